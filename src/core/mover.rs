//! File mover.
//!
//! Applies a `RenamePlan`: creates the destination directories, moves the
//! file, and backdates it to the release date when one is known.

use crate::models::plan::RenamePlan;
use crate::utils::fs;
use crate::Result;
use chrono::{Local, NaiveDate};
use filetime::FileTime;
use std::path::{Path, PathBuf};

/// Result of applying a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source already sits at the destination.
    AlreadyInPlace,
    /// File was moved.
    Moved {
        destination: PathBuf,
        timestamp: TimestampStatus,
    },
}

/// What happened to the file times after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampStatus {
    NotRequested,
    Applied(NaiveDate),
    /// The move succeeded but the times could not be set.
    Failed(String),
}

/// Apply a plan to a source file.
pub fn apply(plan: &RenamePlan, source_path: &Path) -> Result<MoveOutcome> {
    let destination = &plan.destination_path;

    if fs::same_file(source_path, destination) {
        tracing::debug!("Already in place: {:?}", destination);
        return Ok(MoveOutcome::AlreadyInPlace);
    }

    if !source_path.exists() {
        return Err(crate::Error::PathNotFound(source_path.display().to_string()));
    }
    if destination.exists() {
        return Err(crate::Error::FileAlreadyExists(
            destination.display().to_string(),
        ));
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::move_file(source_path, destination)?;

    let timestamp = match plan.timestamp_override.as_deref() {
        None => TimestampStatus::NotRequested,
        Some(date) => match set_release_date(destination, date) {
            Ok(parsed) => TimestampStatus::Applied(parsed),
            Err(e) => {
                tracing::warn!("Could not update file date for {:?}: {}", destination, e);
                TimestampStatus::Failed(e.to_string())
            }
        },
    };

    Ok(MoveOutcome::Moved {
        destination: destination.clone(),
        timestamp,
    })
}

/// Parse a `YYYY-MM-DD` release date.
pub fn parse_release_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| crate::Error::InvalidDate(format!("{}: {}", date, e)))
}

/// Local midnight of a date as a `FileTime`.
pub fn local_midnight(date: NaiveDate) -> Result<FileTime> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| crate::Error::InvalidDate(date.to_string()))?;

    // earliest() picks a side when midnight is ambiguous due to DST
    let local = midnight
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| crate::Error::InvalidDate(format!("{} has no local midnight", date)))?;

    Ok(FileTime::from_unix_time(local.timestamp(), 0))
}

/// Set access and modification times of a file to local midnight of `date`.
pub fn set_release_date(path: &Path, date: &str) -> Result<NaiveDate> {
    let parsed = parse_release_date(date)?;
    let time = local_midnight(parsed)?;
    filetime::set_file_times(path, time, time)?;
    Ok(parsed)
}
