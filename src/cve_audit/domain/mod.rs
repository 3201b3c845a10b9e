pub mod debian_version;
pub mod priority;
pub mod scan_result;

use std::collections::BTreeMap;

pub use debian_version::DebianVersion;
pub use priority::Priority;
pub use scan_result::ScanResult;

/// Installed packages of a machine: package name to version string
pub type PackageMap = BTreeMap<String, String>;

/// Number of scan results per priority
pub type PriorityTally = BTreeMap<Priority, usize>;
