//! Media Renamer CLI
//!
//! A command-line tool for renaming movies and TV episodes using TMDB.

use clap::Parser;
use media_renamer::cli::{
    args::{Cli, Commands},
    commands::{check, rename},
};
use media_renamer::models::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config(cli.config.as_deref())?;

    // Run the appropriate command
    match cli.command {
        Commands::Rename {
            paths,
            output,
            dry_run,
        } => {
            rename::rename(&config, &paths, output.as_deref(), dry_run).await?;
        }

        Commands::Check => {
            if !check::check(&config).await {
                anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
            }
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_renamer=debug")
    } else {
        EnvFilter::new("media_renamer=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
