use serde::Deserialize;
use std::collections::BTreeMap;

/// Vulnerability database for one release series, in the Ubuntu CVE
/// tracker layout used by `cvescan`
///
/// ```json
/// {"CVE-2023-0001": {"priority": "high", "releases": {"focal": {"openssl": {
///     "status": ["released", "1.1.1f-1ubuntu2.17"],
///     "binaries": {"libssl1.1": "1.1.1f-1ubuntu2.17"},
///     "repository": "Ubuntu Archive"}}}}}
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct UctDatabase {
    pub records: BTreeMap<String, CveRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CveRecord {
    pub priority: String,
    /// codename → source package → status
    #[serde(default)]
    pub releases: BTreeMap<String, BTreeMap<String, SourceStatus>>,
}

#[derive(Debug, Deserialize)]
pub struct SourceStatus {
    /// `[state]` or `[state, version]`
    pub status: Vec<Option<String>>,
    /// binary package → version that ships the fix
    #[serde(default)]
    pub binaries: BTreeMap<String, String>,
    #[serde(default)]
    pub repository: Option<String>,
}

impl SourceStatus {
    pub fn state(&self) -> &str {
        self.status
            .first()
            .and_then(|state| state.as_deref())
            .unwrap_or_default()
    }

    pub fn version(&self) -> Option<&str> {
        self.status
            .get(1)
            .and_then(|version| version.as_deref())
            .filter(|version| !version.is_empty())
    }
}
