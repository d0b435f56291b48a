//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Renamer - Rename movies and TV episodes into a clean library layout
#[derive(Parser, Debug)]
#[command(name = "media-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: <config dir>/media_renamer/config.toml)
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename and move media files
    Rename {
        /// Files or directories to process (directories are walked recursively)
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<PathBuf>,

        /// Output root (default: the input directory)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the configured TMDB credentials work
    Check,
}
