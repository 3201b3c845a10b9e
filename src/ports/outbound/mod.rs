/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (shell sessions, vulnerability data,
/// file system, console, etc.).
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod reference_data;
pub mod remote_session;
pub mod vulnerability_scanner;

pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use reference_data::ReferenceDataProvider;
pub use remote_session::{CommandOutput, RemoteSession, RunOptions, LOCAL_HOST};
pub use vulnerability_scanner::VulnerabilityScanner;
