/// Vulnerability scanner adapters
mod uct_database;
mod uct_scanner;

pub use uct_database::{CveRecord, SourceStatus, UctDatabase};
pub use uct_scanner::{UctScanner, DEFAULT_REPOSITORY};
