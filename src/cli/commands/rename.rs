//! Rename command implementation.
//!
//! Resolves inputs, then runs the renamer with the TMDB client and the
//! console sink.

use crate::cli::console::ConsoleSink;
use crate::core::planner;
use crate::core::renamer::{RunSummary, Renamer};
use crate::core::scanner::PathListResolver;
use crate::models::config::Config;
use crate::services::tmdb::TmdbClient;
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the rename command.
pub async fn rename(
    config: &Config,
    paths: &[PathBuf],
    output: Option<&Path>,
    dry_run: bool,
) -> Result<RunSummary> {
    if paths.is_empty() {
        return Err(crate::Error::NoInputSelected);
    }

    let output_root = match output {
        Some(o) => std::path::absolute(o)?,
        None => planner::default_output_root(paths)
            .ok_or_else(|| crate::Error::PathNotFound(paths[0].display().to_string()))?,
    };

    if dry_run {
        println!("{}", "[DRY RUN] No files will be moved".bold().yellow());
    }
    println!("{} Output root: {}", "[INFO]".blue(), output_root.display());

    let client = TmdbClient::new(&config.tmdb);
    if client.credentials().is_empty() {
        tracing::warn!("{}", crate::Error::TmdbApiKeyMissing);
    }

    let resolver = PathListResolver::new(paths.to_vec());
    let mut renamer = Renamer::new(client, ConsoleSink::new(), output_root).with_dry_run(dry_run);
    let summary = renamer.run(&resolver).await;
    renamer.sink().finish();
    let summary = summary?;

    print_summary(&summary, dry_run);
    Ok(summary)
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!();
    println!("{}", "[Summary]".bold().green());
    if dry_run {
        println!("  {} {}", "Planned:".bold(), summary.planned);
    } else {
        println!("  {} {}", "Renamed:".bold(), summary.moved);
        println!("  {} {}", "Already in place:".bold(), summary.already_in_place);
    }
    println!("  {} {}", "Skipped:".bold(), summary.skipped);
    println!("  {} {}", "Failed:".bold(), summary.failed);

    if summary.failed == 0 {
        println!("{} Renaming completed!", "[SUCCESS]".green());
    }
}
