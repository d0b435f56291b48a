//! Rename orchestration.
//!
//! Runs every resolved input through classify -> lookup -> plan -> move,
//! one file at a time. A failure only ends the pipeline for that file.

use crate::core::events::{EventSink, RenameEvent, SkipReason};
use crate::core::mover::{self, MoveOutcome, TimestampStatus};
use crate::core::scanner::{self, InputResolver};
use crate::core::{classifier, planner};
use crate::models::media::{MediaFile, MediaKind};
use crate::models::plan::RenamePlan;
use crate::services::lookup::EpisodeLookup;
use crate::Result;
use std::path::{Path, PathBuf};

/// Terminal state of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Moved(PathBuf),
    AlreadyInPlace,
    /// Dry run: the destination that would have been used.
    Planned(PathBuf),
    Skipped(SkipReason),
    Failed(String),
}

/// Counts for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub already_in_place: usize,
    pub planned: usize,
    /// Media files skipped because their name could not be parsed.
    pub skipped: usize,
    pub failed: usize,
    /// Files ignored for not being media.
    pub ignored: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Moved(_) => self.moved += 1,
            FileOutcome::AlreadyInPlace => self.already_in_place += 1,
            FileOutcome::Planned(_) => self.planned += 1,
            FileOutcome::Skipped(SkipReason::NotMedia) => self.ignored += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Sequential media renamer.
pub struct Renamer<L, S> {
    lookup: L,
    sink: S,
    output_root: PathBuf,
    dry_run: bool,
}

impl<L: EpisodeLookup, S: EventSink> Renamer<L, S> {
    pub fn new(lookup: L, sink: S, output_root: impl Into<PathBuf>) -> Self {
        Self {
            lookup,
            sink,
            output_root: output_root.into(),
            dry_run: false,
        }
    }

    /// Plan and report without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process every file the resolver yields.
    ///
    /// Fails only when no input was selected at all.
    pub async fn run<R: InputResolver>(&mut self, resolver: &R) -> Result<RunSummary> {
        let paths = resolver.resolve()?;
        let mut summary = RunSummary::default();

        for path in &paths {
            let outcome = self.process_path(path).await;
            summary.record(&outcome);
        }

        tracing::info!(
            "Run finished: {} moved, {} in place, {} planned, {} skipped, {} failed, {} ignored",
            summary.moved,
            summary.already_in_place,
            summary.planned,
            summary.skipped,
            summary.failed,
            summary.ignored
        );

        Ok(summary)
    }

    /// Run the full pipeline for one path.
    pub async fn process_path(&mut self, path: &Path) -> FileOutcome {
        let Some(file) = scanner::media_file(path) else {
            tracing::debug!("Ignoring non-media file: {}", path.display());
            return FileOutcome::Skipped(SkipReason::NotMedia);
        };

        self.sink.emit(RenameEvent::Processing {
            source: file.source_path.clone(),
            kind: file.kind,
        });

        let plan = match file.kind {
            MediaKind::Episode => match self.plan_episode(&file).await {
                Some(plan) => plan,
                None => {
                    self.sink.emit(RenameEvent::Skipped {
                        source: file.source_path.clone(),
                        reason: SkipReason::UnparseableEpisode,
                    });
                    return FileOutcome::Skipped(SkipReason::UnparseableEpisode);
                }
            },
            MediaKind::Movie => planner::plan_movie(&file, &self.output_root),
        };

        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => return self.fail(&file, e),
        };

        if self.dry_run {
            self.sink.emit(RenameEvent::Planned {
                source: file.source_path.clone(),
                destination: plan.destination_path.clone(),
            });
            return FileOutcome::Planned(plan.destination_path);
        }

        self.apply(&file, &plan)
    }

    /// Parse, look up and plan an episode. `None` means unparseable.
    async fn plan_episode(&mut self, file: &MediaFile) -> Option<Result<RenamePlan>> {
        let identity = classifier::extract_episode_identity(&file.stem)?;
        if planner::show_folder_name(&identity.show_name).is_empty() {
            return None;
        }

        let metadata = self
            .lookup
            .lookup_episode(&identity.show_name, identity.season, identity.episode)
            .await;

        if metadata.title.is_none() {
            self.sink.emit(RenameEvent::MetadataMissing {
                source: file.source_path.clone(),
                show_name: identity.show_name.clone(),
            });
        }

        Some(planner::plan_episode(file, &identity, &metadata, &self.output_root))
    }

    fn apply(&mut self, file: &MediaFile, plan: &RenamePlan) -> FileOutcome {
        match mover::apply(plan, &file.source_path) {
            Ok(MoveOutcome::AlreadyInPlace) => {
                self.sink.emit(RenameEvent::AlreadyInPlace {
                    path: file.source_path.clone(),
                });
                FileOutcome::AlreadyInPlace
            }
            Ok(MoveOutcome::Moved {
                destination,
                timestamp,
            }) => {
                self.sink.emit(RenameEvent::Moved {
                    source: file.source_path.clone(),
                    destination: destination.clone(),
                });
                match timestamp {
                    TimestampStatus::NotRequested => {}
                    TimestampStatus::Applied(date) => {
                        self.sink.emit(RenameEvent::TimestampUpdated {
                            path: destination.clone(),
                            date,
                        })
                    }
                    TimestampStatus::Failed(error) => {
                        self.sink.emit(RenameEvent::TimestampFailed {
                            path: destination.clone(),
                            error,
                        })
                    }
                }
                FileOutcome::Moved(destination)
            }
            Err(e) => self.fail(file, e),
        }
    }

    fn fail(&mut self, file: &MediaFile, error: crate::Error) -> FileOutcome {
        tracing::debug!("Failed to rename {}: {}", file.source_path.display(), error);
        let error = error.to_string();
        self.sink.emit(RenameEvent::Failed {
            source: file.source_path.clone(),
            error: error.clone(),
        });
        FileOutcome::Failed(error)
    }
}
