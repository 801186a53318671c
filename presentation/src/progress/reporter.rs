//! Progress reporting for respond requests

use ganesha_application::StageNotifier;
use ganesha_domain::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Shows a spinner naming the current stage; cleared when the request ends
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageNotifier for ProgressReporter {
    fn on_stage(&self, stage: Stage) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };

        if stage.is_terminal() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
            return;
        }

        spinner
            .get_or_insert_with(Self::start_spinner)
            .set_message(format!("{}...", stage.display_name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lives_until_terminal_stage() {
        let reporter = ProgressReporter::new();
        reporter.on_stage(Stage::Received);
        reporter.on_stage(Stage::Classifying);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_stage(Stage::Parsed);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_terminal_stage_without_spinner_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_stage(Stage::Rejected);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
