//! Command execution adapters for the Juju client host
mod elevation;
mod local;
mod process;
mod ssh;

pub use local::LocalSession;
pub use ssh::SshSession;

use crate::ports::outbound::{CommandOutput, RemoteSession, LOCAL_HOST};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::rc::Rc;
use std::time::Duration;

/// Default bound on a single command
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection parameters shared by both session kinds
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// User commands are run as; `None` keeps the session identity
    pub doas: Option<String>,
    pub timeout: Duration,
    /// Extra `-o` options passed to `ssh`
    pub ssh_options: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            doas: None,
            timeout: DEFAULT_TIMEOUT,
            ssh_options: Vec::new(),
        }
    }
}

/// Builds the session for `host`: local execution for [`LOCAL_HOST`], `ssh` otherwise
pub fn connect(host: &str, settings: SessionSettings) -> Rc<dyn RemoteSession> {
    if host == LOCAL_HOST {
        Rc::new(LocalSession::new(settings))
    } else {
        Rc::new(SshSession::new(host, settings))
    }
}

/// Turns a non-zero exit into an error unless failures are allowed
fn check_exit(command: &str, output: CommandOutput, allow_failure: bool) -> Result<CommandOutput> {
    if output.success() || allow_failure {
        return Ok(output);
    }
    Err(AuditError::RemoteExecution {
        command: command.to_string(),
        exit_code: output.exit_code,
        stderr: output.stderr.trim().to_string(),
    }
    .into())
}
