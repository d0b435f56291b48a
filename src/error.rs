//! Error types for the media renamer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media renamer.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("No input selected")]
    NoInputSelected,

    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEYS or add api_keys to the config file")]
    TmdbApiKeyMissing,

    #[error("Invalid config file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Destination outside output root: {0}")]
    InvalidDestination(String),

    #[error("Checksum mismatch after copying: {0}")]
    ChecksumMismatch(String),

    #[error("Invalid release date: {0}")]
    InvalidDate(String),

    // TMDB errors
    #[error("TV show not found on TMDB: {0}")]
    TvShowNotFound(String),

    #[error("No TMDB credential available")]
    NoCredential,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
