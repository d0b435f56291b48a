//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a media file was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Episode,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Episode => write!(f, "episode"),
        }
    }
}

/// A media file picked up from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Absolute path to the file.
    pub source_path: PathBuf,
    /// File name without its extension.
    pub stem: String,
    /// Extension including the leading dot, exactly as found on disk.
    pub extension: String,
    /// Movie or episode.
    pub kind: MediaKind,
}

/// Show, season and episode parsed from an episode filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeIdentity {
    /// Show name as it appears in the filename.
    pub show_name: String,
    /// Season number.
    pub season: u16,
    /// Episode number.
    pub episode: u16,
}

/// Best-effort episode metadata from TMDB.
///
/// Both fields may be absent; an empty result is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataResult {
    /// Episode title.
    pub title: Option<String>,
    /// Air date (YYYY-MM-DD), verbatim from the service.
    pub release_date: Option<String>,
}

impl MetadataResult {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }
}
