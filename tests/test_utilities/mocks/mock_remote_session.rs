use juju_cve_audit::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock RemoteSession answering from a command table
///
/// Every command is recorded. Commands without a scripted answer exit with
/// 127, like a shell that cannot find the program.
#[derive(Default)]
pub struct MockRemoteSession {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<String>>,
}

impl MockRemoteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.responses.insert(
            command.into(),
            CommandOutput {
                stdout: stdout.into(),
                stderr: String::new(),
                exit_code: 0,
            },
        );
        self
    }

    pub fn fail(mut self, command: impl Into<String>, exit_code: i32, stderr: &str) -> Self {
        self.responses.insert(
            command.into(),
            CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code,
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == command).count()
    }
}

impl RemoteSession for MockRemoteSession {
    fn host(&self) -> &str {
        "mock"
    }

    fn open(&self) -> Result<()> {
        Ok(())
    }

    fn run_with(&self, command: &str, options: &RunOptions) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.to_string());
        let output = self.responses.get(command).cloned().unwrap_or(CommandOutput {
            stdout: String::new(),
            stderr: format!("sh: 1: {}: not found", command),
            exit_code: 127,
        });

        if !output.success() && !options.allow_failure {
            return Err(AuditError::RemoteExecution {
                command: command.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(output)
    }
}
