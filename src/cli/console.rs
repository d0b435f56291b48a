//! Colored console rendering of renamer events.

use crate::core::events::{EventLevel, EventSink, RenameEvent};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Prints events as `[SUCCESS]` / `[ERROR]` / `[INFO]` lines above a spinner.
pub struct ConsoleSink {
    spinner: ProgressBar,
}

impl ConsoleSink {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Format one event line.
pub fn render(event: &RenameEvent) -> String {
    let tag = match event.level() {
        EventLevel::Success => "[SUCCESS]".green(),
        EventLevel::Error => "[ERROR]".red(),
        EventLevel::Info => "[INFO]".blue(),
    };
    format!("{} {}", tag, event.message())
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: RenameEvent) {
        match &event {
            RenameEvent::Processing { source, .. } => {
                let name = source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.spinner.set_message(name);
            }
            _ => self.spinner.println(render(&event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_contains_tag_and_message() {
        colored::control::set_override(false);
        let line = render(&RenameEvent::AlreadyInPlace {
            path: PathBuf::from("/out/Inception.mp4"),
        });
        assert_eq!(line, "[INFO] Already in place: /out/Inception.mp4");
    }
}
