//! Progress spinner helpers using indicatif

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::RunObserver;
use crate::report::FileOutcome;

/// Create a spinner for one file conversion
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Spinner that draws nothing, for quiet runs
pub fn create_hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

/// Finish a progress bar with a success message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

/// Finish a progress bar with a warning message
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠️  {}", message));
}

/// One spinner per converted file, finished with the row count or a mismatch warning.
pub struct FileSpinners {
    quiet: bool,
    current: Option<ProgressBar>,
}

impl FileSpinners {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            current: None,
        }
    }
}

impl RunObserver for FileSpinners {
    fn file_started(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.current = Some(if self.quiet {
            create_hidden_spinner()
        } else {
            create_spinner(&format!("Converting {}...", name))
        });
    }

    fn file_finished(&mut self, outcome: &FileOutcome) {
        let Some(spinner) = self.current.take() else {
            return;
        };
        let name = outcome.file_name();
        if outcome.is_reconciled() {
            finish_with_success(&spinner, &format!("{} → {} rows", name, outcome.rows_written));
        } else {
            finish_with_warning(
                &spinner,
                &format!(
                    "{}: {} lines in source, {} rows written (logged to errors.txt)",
                    name, outcome.original_lines, outcome.rows_written
                ),
            );
        }
    }
}
