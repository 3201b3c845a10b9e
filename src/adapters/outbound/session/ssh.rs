use super::elevation::Elevation;
use super::process::run_process;
use super::{check_exit, SessionSettings};
use crate::ports::outbound::{CommandOutput, RemoteSession, RunOptions};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::time::Duration;

/// Exit status `ssh` uses for its own failures
const SSH_FAILURE: i32 = 255;

const SSH_PROGRAM: &str = "ssh";

/// Runs commands on a remote Juju client host through the system `ssh`
///
/// `ssh` runs non-interactively (`BatchMode=yes`); keys come from the
/// user's agent and configuration.
pub struct SshSession {
    program: String,
    host: String,
    elevation: Elevation,
    timeout: Duration,
    options: Vec<String>,
}

impl SshSession {
    pub fn new(host: impl Into<String>, settings: SessionSettings) -> Self {
        Self {
            program: SSH_PROGRAM.to_string(),
            host: host.into(),
            elevation: Elevation::new(settings.doas),
            timeout: settings.timeout,
            options: settings.ssh_options,
        }
    }

    /// Arguments passed to `ssh` for `command`
    fn ssh_args<'a>(&'a self, command: &'a str) -> Vec<&'a str> {
        let mut args = vec!["-o", "BatchMode=yes"];
        for option in &self.options {
            args.push("-o");
            args.push(option.as_str());
        }
        args.extend([self.host.as_str(), "--", command]);
        args
    }

    /// Replaces the `ssh` binary, e.g. with a wrapper script
    #[cfg(test)]
    fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn exec(&self, command: &str, timeout: Duration) -> Result<CommandOutput> {
        run_process(&self.program, &self.ssh_args(command), command, timeout)
    }

    /// Runs `whoami`, treating status 255 as an unreachable host.
    ///
    /// Remote commands may exit 255 themselves; `run_with` leaves that to `check_exit`.
    fn resolve_identity(&self) -> Result<String> {
        let output = self.exec("whoami", self.timeout)?;
        if output.exit_code == SSH_FAILURE {
            return Err(AuditError::Connection {
                host: self.host.clone(),
                details: output.stderr.trim().to_string(),
            }
            .into());
        }
        let output = check_exit("whoami", output, false)?;
        Ok(output.stdout.trim().to_string())
    }
}

impl RemoteSession for SshSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn open(&self) -> Result<()> {
        tracing::info!(host = %self.host, "connecting");
        let identity = self.elevation.identity(|| self.resolve_identity())?;
        tracing::debug!(host = %self.host, %identity, "connected");
        Ok(())
    }

    fn run_with(&self, command: &str, options: &RunOptions) -> Result<CommandOutput> {
        let prepared = self.elevation.prepare(command, || self.resolve_identity())?;
        tracing::debug!(host = %self.host, command = %prepared, "running over ssh");

        let output = self.exec(&prepared, options.timeout.unwrap_or(self.timeout))?;
        check_exit(command, output, options.allow_failure)
    }
}
