/// Console adapters for progress reporting and terminal output
mod progress_reporter;
mod results_printer;

pub use progress_reporter::{SilentProgressReporter, StderrProgressReporter};
pub use results_printer::ConsolePrinter;
