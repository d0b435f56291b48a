//! Per-file events emitted by the renamer.
//!
//! The renamer only emits; rendering is up to the sink.

use crate::models::media::MediaKind;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Severity of an event, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Success,
    Error,
    Info,
}

/// Why a media file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not an allowed media extension.
    NotMedia,
    /// Has an `SxxExx` marker but no show name in front of it.
    UnparseableEpisode,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotMedia => write!(f, "not a media file"),
            SkipReason::UnparseableEpisode => write!(f, "unparseable episode name"),
        }
    }
}

/// Something that happened to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    Processing {
        source: PathBuf,
        kind: MediaKind,
    },
    MetadataMissing {
        source: PathBuf,
        show_name: String,
    },
    Planned {
        source: PathBuf,
        destination: PathBuf,
    },
    Moved {
        source: PathBuf,
        destination: PathBuf,
    },
    AlreadyInPlace {
        path: PathBuf,
    },
    TimestampUpdated {
        path: PathBuf,
        date: NaiveDate,
    },
    TimestampFailed {
        path: PathBuf,
        error: String,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

impl RenameEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            RenameEvent::Moved { .. } | RenameEvent::TimestampUpdated { .. } => EventLevel::Success,
            RenameEvent::Failed { .. }
            | RenameEvent::TimestampFailed { .. }
            | RenameEvent::MetadataMissing { .. } => EventLevel::Error,
            RenameEvent::Processing { .. }
            | RenameEvent::Planned { .. }
            | RenameEvent::AlreadyInPlace { .. }
            | RenameEvent::Skipped { .. } => EventLevel::Info,
        }
    }

    /// Human readable one-liner.
    pub fn message(&self) -> String {
        match self {
            RenameEvent::Processing { source, kind } => {
                format!("Processing {}: {}", kind, source.display())
            }
            RenameEvent::MetadataMissing { source, show_name } => format!(
                "No TMDB metadata for '{}', using fallback title: {}",
                show_name,
                source.display()
            ),
            RenameEvent::Planned { source, destination } => {
                format!("Would rename: {} -> {}", source.display(), destination.display())
            }
            RenameEvent::Moved { source, destination } => {
                format!("Renamed: {} -> {}", source.display(), destination.display())
            }
            RenameEvent::AlreadyInPlace { path } => format!("Already in place: {}", path.display()),
            RenameEvent::TimestampUpdated { path, date } => {
                format!("Updated file date to {} for: {}", date, path.display())
            }
            RenameEvent::TimestampFailed { path, error } => {
                format!("Could not update file date for {}: {}", path.display(), error)
            }
            RenameEvent::Skipped { source, reason } => {
                format!("Skipped ({}): {}", reason, source.display())
            }
            RenameEvent::Failed { source, error } => {
                format!("Error renaming {}: {}", source.display(), error)
            }
        }
    }
}

/// Receives renamer events.
pub trait EventSink {
    fn emit(&mut self, event: RenameEvent);
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<RenameEvent>,
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: RenameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let moved = RenameEvent::Moved {
            source: PathBuf::from("/a.mkv"),
            destination: PathBuf::from("/b.mkv"),
        };
        assert_eq!(moved.level(), EventLevel::Success);
        assert_eq!(moved.message(), "Renamed: /a.mkv -> /b.mkv");

        let failed = RenameEvent::Failed {
            source: PathBuf::from("/a.mkv"),
            error: "boom".to_string(),
        };
        assert_eq!(failed.level(), EventLevel::Error);

        let skipped = RenameEvent::Skipped {
            source: PathBuf::from("/S01E01.mkv"),
            reason: SkipReason::UnparseableEpisode,
        };
        assert_eq!(skipped.level(), EventLevel::Info);
        assert!(skipped.message().contains("unparseable episode name"));
    }
}
