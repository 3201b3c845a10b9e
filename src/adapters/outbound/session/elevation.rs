use crate::shared::shell::quote;
use crate::shared::Result;
use std::cell::OnceCell;

/// Runs commands as an acting user when it differs from the session identity
///
/// The identity is resolved once and remembered for the session.
pub struct Elevation {
    doas: Option<String>,
    identity: OnceCell<String>,
}

impl Elevation {
    pub fn new(doas: Option<String>) -> Self {
        Self {
            doas,
            identity: OnceCell::new(),
        }
    }

    pub fn doas(&self) -> Option<&str> {
        self.doas.as_deref()
    }

    /// Returns the identity, resolving it with `resolve` on first use
    pub fn identity(&self, resolve: impl FnOnce() -> Result<String>) -> Result<&str> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity);
        }
        let resolved = resolve()?;
        tracing::debug!(identity = %resolved, "resolved session identity");
        Ok(self.identity.get_or_init(|| resolved))
    }

    /// Wraps `command` for the acting user, or returns it unchanged
    ///
    /// The identity is only resolved when an acting user is configured.
    pub fn prepare(
        &self,
        command: &str,
        resolve: impl FnOnce() -> Result<String>,
    ) -> Result<String> {
        let Some(doas) = self.doas.as_deref() else {
            return Ok(command.to_string());
        };
        if self.identity(resolve)? == doas {
            return Ok(command.to_string());
        }
        Ok(elevate(command, doas))
    }
}

/// `sudo` wrapper running `command` through `sh` as `user`
pub fn elevate(command: &str, user: &str) -> String {
    format!("sudo -n -H -u {} -- sh -c {}", quote(user), quote(command))
}
