use super::uct_database::{SourceStatus, UctDatabase};
use crate::cve_audit::domain::{DebianVersion, PackageMap, Priority, ScanResult};
use crate::ports::outbound::VulnerabilityScanner;
use crate::shared::Result;
use std::cmp::Ordering;
use std::str::FromStr;

/// Repository reported when the tracker does not name one
pub const DEFAULT_REPOSITORY: &str = "Ubuntu Archive";

/// Scanner over the Ubuntu CVE tracker database
///
/// An installed binary package is affected when its source is
/// - `released` and the installed version is older than the fix, or
/// - `needed`, `deferred` or `pending`, in which case no fix exists yet.
///
/// Records whose priority is not recognized are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct UctScanner;

impl UctScanner {
    pub fn new() -> Self {
        Self
    }

    fn finding(
        cve_id: &str,
        priority: Priority,
        binary: &str,
        installed: &str,
        fix_version: &str,
        status: &SourceStatus,
    ) -> Option<ScanResult> {
        let fixed_version = match status.state() {
            "released" => {
                let fixed = if fix_version.is_empty() {
                    status.version()?
                } else {
                    fix_version
                };
                if !Self::is_older(installed, fixed) {
                    return None;
                }
                Some(fixed.to_string())
            }
            "needed" | "deferred" | "pending" => None,
            _ => return None,
        };

        Some(ScanResult::new(
            cve_id,
            priority,
            binary,
            fixed_version,
            status.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY),
        ))
    }

    fn is_older(installed: &str, fixed: &str) -> bool {
        match (DebianVersion::parse(installed), DebianVersion::parse(fixed)) {
            (Ok(installed), Ok(fixed)) => installed.cmp(&fixed) == Ordering::Less,
            _ => {
                tracing::warn!(installed, fixed, "unparseable package version, skipping");
                false
            }
        }
    }
}

impl VulnerabilityScanner for UctScanner {
    type Data = UctDatabase;

    fn scan(&self, codename: &str, data: &UctDatabase, packages: &PackageMap) -> Result<Vec<ScanResult>> {
        let mut results = Vec::new();

        for (cve_id, record) in &data.records {
            let Some(sources) = record.releases.get(codename) else {
                continue;
            };
            let priority = match Priority::from_str(&record.priority) {
                Ok(priority) => priority,
                Err(_) => {
                    tracing::warn!(cve = %cve_id, priority = %record.priority, "unknown priority, skipping record");
                    continue;
                }
            };

            for status in sources.values() {
                for (binary, fix_version) in &status.binaries {
                    let Some(installed) = packages.get(binary) else {
                        continue;
                    };
                    results.extend(Self::finding(cve_id, priority, binary, installed, fix_version, status));
                }
            }
        }

        tracing::debug!(codename, packages = packages.len(), findings = results.len(), "scan complete");
        Ok(results)
    }
}
