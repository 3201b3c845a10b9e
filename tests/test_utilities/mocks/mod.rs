/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_reference_data;
mod mock_remote_session;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_reference_data::MockReferenceDataProvider;
pub use mock_remote_session::MockRemoteSession;
