//! Rename planner.
//!
//! Combines classification and lookup results into a concrete
//! destination path under the output root.
//!
//! Layout:
//! - Episodes: `<root>/<Show>/Season <n>/SxxEyy - <Title><ext>`
//! - Movies: `<root>/<Title><ext>`

use crate::core::sanitizer::sanitize;
use crate::models::media::{EpisodeIdentity, MediaFile, MetadataResult};
use crate::models::plan::RenamePlan;
use crate::Result;
use std::path::{Component, Path, PathBuf};

/// Build the episode filename, e.g. `S01E01 - Pilot.mkv`.
pub fn episode_filename(
    identity: &EpisodeIdentity,
    title: Option<&str>,
    extension: &str,
) -> String {
    let display_name = match title {
        Some(t) => t.to_string(),
        None => format!("Episode {}", identity.episode),
    };

    format!(
        "S{:02}E{:02} - {}{}",
        identity.season,
        identity.episode,
        sanitize(&display_name, false),
        extension
    )
}

/// Folder name for a show.
///
/// Dots and underscores in release-style names are word separators.
pub fn show_folder_name(show_name: &str) -> String {
    let spaced: String = show_name
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .collect();
    sanitize(&spaced, true)
}

/// Season folder name, e.g. `Season 1`.
pub fn season_folder_name(season: u16) -> String {
    format!("Season {}", season)
}

/// Plan an episode.
pub fn plan_episode(
    file: &MediaFile,
    identity: &EpisodeIdentity,
    metadata: &MetadataResult,
    output_root: &Path,
) -> Result<RenamePlan> {
    let show_folder = show_folder_name(&identity.show_name);
    if show_folder.is_empty() {
        return Err(crate::Error::InvalidDestination(format!(
            "empty show name in {}",
            file.source_path.display()
        )));
    }

    let filename = episode_filename(identity, metadata.title.as_deref(), &file.extension);
    let destination_path = output_root
        .join(show_folder)
        .join(season_folder_name(identity.season))
        .join(filename);

    ensure_inside(&destination_path, output_root)?;

    Ok(RenamePlan {
        destination_path,
        timestamp_override: metadata.release_date.clone(),
    })
}

/// Plan a movie. Movies are never enriched and never get a timestamp.
pub fn plan_movie(file: &MediaFile, output_root: &Path) -> Result<RenamePlan> {
    let title = sanitize(&file.stem, false);
    if title.is_empty() {
        return Err(crate::Error::InvalidDestination(format!(
            "empty title for {}",
            file.source_path.display()
        )));
    }

    let destination_path = output_root.join(format!("{}{}", title, file.extension));
    ensure_inside(&destination_path, output_root)?;

    Ok(RenamePlan {
        destination_path,
        timestamp_override: None,
    })
}

/// Reject destinations that escape the output root.
fn ensure_inside(destination: &Path, root: &Path) -> Result<()> {
    let relative = destination
        .strip_prefix(root)
        .map_err(|_| crate::Error::InvalidDestination(destination.display().to_string()))?;

    let all_normal = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if !all_normal || relative.as_os_str().is_empty() {
        return Err(crate::Error::InvalidDestination(
            destination.display().to_string(),
        ));
    }
    Ok(())
}

/// Output root default: the first input directory, or a file's parent.
///
/// A bare relative filename resolves against the working directory.
pub fn default_output_root(inputs: &[PathBuf]) -> Option<PathBuf> {
    let first = inputs.first()?;
    let root = if first.is_dir() {
        first.as_path()
    } else {
        first
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    };
    std::path::absolute(root).ok()
}
