use super::elevation::Elevation;
use super::process::run_process;
use super::{check_exit, SessionSettings};
use crate::ports::outbound::{CommandOutput, RemoteSession, RunOptions, LOCAL_HOST};
use crate::shared::Result;
use std::time::Duration;

/// Runs commands on this machine through `sh -c`
pub struct LocalSession {
    elevation: Elevation,
    timeout: Duration,
}

impl LocalSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            elevation: Elevation::new(settings.doas),
            timeout: settings.timeout,
        }
    }

    fn exec(&self, command: &str, timeout: Duration) -> Result<CommandOutput> {
        run_process("sh", &["-c", command], command, timeout)
    }

    fn resolve_identity(&self) -> Result<String> {
        if let Ok(user) = std::env::var("USER") {
            if !user.is_empty() {
                return Ok(user);
            }
        }
        let output = check_exit("whoami", self.exec("whoami", self.timeout)?, false)?;
        Ok(output.stdout.trim().to_string())
    }
}

impl RemoteSession for LocalSession {
    fn host(&self) -> &str {
        LOCAL_HOST
    }

    fn open(&self) -> Result<()> {
        if self.elevation.doas().is_some() {
            self.elevation.identity(|| self.resolve_identity())?;
        }
        Ok(())
    }

    fn run_with(&self, command: &str, options: &RunOptions) -> Result<CommandOutput> {
        let prepared = self.elevation.prepare(command, || self.resolve_identity())?;
        tracing::debug!(command = %prepared, "running locally");

        let output = self.exec(&prepared, options.timeout.unwrap_or(self.timeout))?;
        tracing::trace!(exit_code = output.exit_code, bytes = output.stdout.len(), "command finished");
        check_exit(command, output, options.allow_failure)
    }
}
