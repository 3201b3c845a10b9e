/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use cases and responses back
/// out, keeping clap types away from the core.
mod audit_request;
mod output_format;

pub use audit_request::{AuditRequest, AuditResponse, AuditTarget, MachineFailure};
pub use output_format::OutputFormat;
