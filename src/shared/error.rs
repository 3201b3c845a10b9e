use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow automation to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no vulnerabilities at or above the configured threshold
    Success = 0,
    /// Vulnerabilities were detected at or above the `--fail-on` priority
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (connection, remote execution, parse, I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for inventory traversal and CVE auditing.
///
/// Every variant carries enough context (host, command, model, machine)
/// to be actionable without re-running at a higher verbosity.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to connect to {host}\nDetails: {details}\n\n💡 Hint: Check that the host is reachable and that your SSH agent holds a usable key")]
    Connection { host: String, details: String },

    #[error("Remote command failed with exit code {exit_code}: {command}{}", format_stderr(.stderr))]
    RemoteExecution {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Unable to parse {context}\nDetails: {details}")]
    Parse { context: String, details: String },

    #[error("Failed to determine ubuntu release codename{}: {reason}", format_value(.value))]
    ReleaseInference { value: String, reason: String },

    #[error("Could not find the specified {kind}: {name}")]
    NotFound { kind: String, name: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    /// Validation error for configuration and arguments
    #[error("Validation error: {message}")]
    Validation { message: String },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\nstderr: {}", trimmed)
    }
}

fn format_value(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(" from '{}'", value)
    }
}
