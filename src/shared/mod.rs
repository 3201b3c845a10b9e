/// Shared utilities and error types used across all layers
pub mod error;
pub mod result;
pub mod security;
pub mod shell;

pub use result::Result;
