//! Input scanner module.
//!
//! Resolves the user's input (files and/or directories) into a flat,
//! sorted list of candidate files, and filters them down to media files.

use crate::core::classifier;
use crate::models::media::MediaFile;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported video container extensions.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "webm", "mkv", "flv", "vob", "ogv", "ogg", "mov", "avi", "qt", "wmv", "yuv", "rm", "asf",
    "amv", "mp4", "m4p", "m4v", "mpg", "mpeg", "mpe", "mpv", "svi", "3gp", "3g2", "mxf", "roq",
    "nsv", "f4v", "f4p", "f4a", "f4b",
];

/// Source of candidate paths for a run.
///
/// The pipeline only sees the resolved list, never how it was obtained.
pub trait InputResolver {
    /// Produce every candidate file path.
    fn resolve(&self) -> Result<Vec<PathBuf>>;
}

/// Resolves an explicit list of files and directories.
///
/// Directories are walked recursively. Missing paths are skipped with a
/// warning.
#[derive(Debug, Clone)]
pub struct PathListResolver {
    paths: Vec<PathBuf>,
}

impl PathListResolver {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl InputResolver for PathListResolver {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        if self.paths.is_empty() {
            return Err(crate::Error::NoInputSelected);
        }

        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                files.extend(walk_files(path));
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                tracing::warn!("Input path not found, skipping: {}", path.display());
            }
        }

        files.sort();
        files.dedup();

        tracing::info!("Resolved {} candidate files", files.len());
        Ok(files)
    }
}

/// Recursively list all regular files under a directory.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Failed to read directory entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Check if a file extension is an allowed media extension.
pub fn is_media_extension(ext: &str) -> bool {
    let ext_lower = ext.trim_start_matches('.').to_lowercase();
    MEDIA_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Build a classified `MediaFile` for a path.
///
/// Returns `None` for non-media files and names that are not valid UTF-8.
pub fn media_file(path: &Path) -> Option<MediaFile> {
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;

    if !is_media_extension(ext) {
        return None;
    }

    let source_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    Some(MediaFile {
        source_path,
        stem: stem.to_string(),
        extension: format!(".{}", ext),
        kind: classifier::classify(stem),
    })
}
