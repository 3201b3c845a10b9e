use crate::cve_audit::domain::{PackageMap, ScanResult};
use crate::shared::Result;

/// VulnerabilityScanner port for matching installed packages against reference data
///
/// One scanner instance is constructed at start-up and reused for every
/// machine.
pub trait VulnerabilityScanner {
    /// Reference data type this scanner consumes
    type Data;

    /// Scans the installed packages of a machine running `codename`
    ///
    /// # Returns
    /// One [`ScanResult`] per (CVE, affected installed package) pair
    fn scan(&self, codename: &str, data: &Self::Data, packages: &PackageMap)
        -> Result<Vec<ScanResult>>;
}
