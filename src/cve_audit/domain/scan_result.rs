use super::Priority;
use serde::{Deserialize, Serialize};

/// ScanResult value object: one vulnerability finding for an installed package
///
/// Fields serialize in tuple order: `cve_id`, `priority`, `package_name`,
/// `fixed_version`, `repository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    cve_id: String,
    priority: Priority,
    package_name: String,
    fixed_version: Option<String>,
    repository: String,
}

impl ScanResult {
    pub fn new(
        cve_id: impl Into<String>,
        priority: Priority,
        package_name: impl Into<String>,
        fixed_version: Option<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            cve_id: cve_id.into(),
            priority,
            package_name: package_name.into(),
            fixed_version,
            repository: repository.into(),
        }
    }

    pub fn cve_id(&self) -> &str {
        &self.cve_id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn fixed_version(&self) -> Option<&str> {
        self.fixed_version.as_deref()
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns true when a fixed version has been published for this finding.
    pub fn has_fix(&self) -> bool {
        self.fixed_version.is_some()
    }

    /// Returns a copy of this result with the CVE identifier replaced.
    pub fn with_cve_id(&self, cve_id: String) -> Self {
        Self {
            cve_id,
            ..self.clone()
        }
    }
}
