//! Check command implementation.

use crate::models::config::Config;
use crate::preflight;
use colored::Colorize;

/// Verify the configured TMDB credentials.
pub async fn check(config: &Config) -> bool {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    preflight::all_passed(&results)
}
