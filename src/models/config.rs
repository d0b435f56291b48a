//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TMDB API base URL.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// Interchangeable API keys or bearer tokens.
    pub api_keys: Vec<String>,
    /// API base URL.
    pub base_url: String,
    /// Language for responses (e.g. "en-US"). Service default when unset.
    pub language: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            base_url: TMDB_BASE_URL.to_string(),
            language: None,
        }
    }
}

impl Config {
    /// Apply `TMDB_API_KEYS` / `TMDB_API_KEY` from the environment.
    pub fn apply_env(&mut self) {
        let from_env = std::env::var("TMDB_API_KEYS")
            .ok()
            .or_else(|| std::env::var("TMDB_API_KEY").ok());

        if let Some(value) = from_env {
            let keys = parse_key_list(&value);
            if !keys.is_empty() {
                self.tmdb.api_keys = keys;
            }
        }
    }
}

/// Split a comma separated key list, dropping blanks.
pub fn parse_key_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_renamer")
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration.
///
/// An explicit path must exist and parse. The default location is optional
/// and falls back to defaults when missing or unreadable.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(p) => {
            if !p.exists() {
                return Err(crate::Error::PathNotFound(p.display().to_string()));
            }
            let content = std::fs::read_to_string(p)?;
            toml::from_str(&content).map_err(|e| crate::Error::InvalidConfig {
                path: p.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => load_default(),
    };

    config.apply_env();
    Ok(config)
}

fn load_default() -> Config {
    let config_path = default_config_path();

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {:?}: {}", config_path, e),
            },
            Err(e) => tracing::warn!("Failed to read config {:?}: {}", config_path, e),
        }
    }

    Config::default()
}
