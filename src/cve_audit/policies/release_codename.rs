use crate::cve_audit::domain::PackageMap;
use crate::shared::error::AuditError;
use crate::shared::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Package whose version identifies the Ubuntu release
pub const RELEASE_PACKAGE: &str = "update-manager-core";

/// Release patterns, oldest release first. Each is anchored at the start
/// of the `update-manager-core` version and the first match wins.
const RELEASE_PATTERNS: &[(&str, &str)] = &[
    (r"^1:0\.196\.", "trusty"),
    (r"^1:16\.04\.", "xenial"),
    (r"^1:18\.04\.", "bionic"),
    (r"^1:20\.04\.", "focal"),
    (r"^1:22\.04\.", "jammy"),
    (r"^1:24\.04\.", "noble"),
];

static RELEASES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    RELEASE_PATTERNS
        .iter()
        .filter_map(|(pattern, codename)| Regex::new(pattern).ok().map(|re| (re, *codename)))
        .collect()
});

/// ReleaseCodenamePolicy - infers the Ubuntu release codename of a machine
///
/// Encodes the mapping from the version of [`RELEASE_PACKAGE`] to a release
/// codename. The table is tried in release-chronology order and is not
/// checked for overlapping patterns.
pub struct ReleaseCodenamePolicy;

impl ReleaseCodenamePolicy {
    /// Resolves the codename from a machine's installed packages
    ///
    /// # Errors
    /// Returns [`AuditError::ReleaseInference`] when the release package is
    /// not installed or its version matches no supported release.
    pub fn resolve(packages: &PackageMap) -> Result<String> {
        let Some(version) = packages.get(RELEASE_PACKAGE) else {
            return Err(AuditError::ReleaseInference {
                value: String::new(),
                reason: format!("package {} is not installed", RELEASE_PACKAGE),
            }
            .into());
        };

        Self::codename_for_version(version)
            .map(str::to_string)
            .ok_or_else(|| {
                AuditError::ReleaseInference {
                    value: version.clone(),
                    reason: "Could not match version to a supported release.".to_string(),
                }
                .into()
            })
    }

    /// Returns the codename of the first release pattern matching `version`
    pub fn codename_for_version(version: &str) -> Option<&'static str> {
        RELEASES
            .iter()
            .find(|(pattern, _)| pattern.is_match(version))
            .map(|(_, codename)| *codename)
    }

    /// Codenames this policy can infer, oldest first
    pub fn supported_codenames() -> impl Iterator<Item = &'static str> {
        RELEASE_PATTERNS.iter().map(|(_, codename)| *codename)
    }
}
