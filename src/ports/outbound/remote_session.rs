use crate::shared::Result;
use std::time::Duration;

/// Host name that selects local execution instead of an SSH connection
pub const LOCAL_HOST: &str = "local";

/// Options for a single command execution
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// When true, a non-zero exit status is returned as a normal
    /// [`CommandOutput`] instead of an error.
    pub allow_failure: bool,
    /// Overrides the session's default timeout for this command.
    pub timeout: Option<Duration>,
}

impl RunOptions {
    /// Options that tolerate a non-zero exit status.
    pub fn allow_failure() -> Self {
        Self {
            allow_failure: true,
            ..Self::default()
        }
    }
}

/// Captured result of a completed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// RemoteSession port for executing shell commands against the Juju client host
///
/// Implementations either run commands on the local machine or through an
/// SSH connection to a bastion. Callers depend only on this trait and never
/// learn which path was taken, including whether privilege elevation was
/// applied for an acting user.
pub trait RemoteSession {
    /// Target host; [`LOCAL_HOST`] for local execution
    fn host(&self) -> &str;

    /// Establishes the underlying connection
    ///
    /// Local sessions never open a network connection and treat this as a
    /// no-op apart from resolving the current identity.
    ///
    /// # Errors
    /// Returns [`AuditError::Connection`](crate::shared::error::AuditError::Connection)
    /// when the host cannot be reached or authentication fails.
    fn open(&self) -> Result<()>;

    /// Runs `command` through the target's shell and captures its output
    ///
    /// # Errors
    /// - [`AuditError::Connection`](crate::shared::error::AuditError::Connection) for transport failures
    /// - [`AuditError::RemoteExecution`](crate::shared::error::AuditError::RemoteExecution) when the
    ///   process cannot be launched, times out, or exits non-zero without `allow_failure`
    fn run_with(&self, command: &str, options: &RunOptions) -> Result<CommandOutput>;

    /// Runs `command` with default options (captured output, non-zero exit is an error)
    fn run(&self, command: &str) -> Result<CommandOutput> {
        self.run_with(command, &RunOptions::default())
    }
}
