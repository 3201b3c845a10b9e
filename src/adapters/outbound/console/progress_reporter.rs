use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so report output on stdout stays clean. Status
/// messages drive an indicatif spinner, since the number of machines is
/// not known until the traversal has listed them.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut spinner = self.spinner.borrow_mut();
        if let Some(pb) = spinner.as_ref() {
            return pb.clone();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        *spinner = Some(pb.clone());
        pb
    }

    fn finish(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.get_or_create_spinner().set_message(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_spinner();
        match message {
            Some(msg) => pb.set_message(format!("[{}/{}] {}", current, total, msg)),
            None => pb.set_message(format!("[{}/{}]", current, total)),
        }
    }

    fn report_error(&self, message: &str) {
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish();
        eprintln!("{}", message);
    }
}

/// SilentProgressReporter discards every message
///
/// Used when stdout carries console output that a spinner would interleave with.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn report(&self, _message: &str) {}

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_completion(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Test message");
        reporter.report_progress(5, 10, Some("test"));
        reporter.report_error("Test error");
        reporter.report_completion("Test completion");
        assert!(reporter.spinner.borrow().is_none());
    }

    #[test]
    fn test_completion_without_spinner() {
        let reporter = StderrProgressReporter::default();
        reporter.report_completion("done");
    }

    #[test]
    fn test_silent_reporter() {
        let reporter = SilentProgressReporter;
        reporter.report("ignored");
        reporter.report_completion("ignored");
    }
}
