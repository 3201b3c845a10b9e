use crate::cve_audit::domain::PackageMap;
use crate::shared::error::AuditError;
use crate::shared::Result;

/// ManifestParser - turns a `dpkg-query -W` listing into a package map
///
/// Each non-empty line must be `name<TAB>version`, with exactly one tab.
pub struct ManifestParser;

impl ManifestParser {
    /// Parses a raw manifest into a package name to version mapping
    ///
    /// # Errors
    /// Returns [`AuditError::Parse`] naming the offending line when a line
    /// does not contain exactly one tab separator.
    pub fn parse_packages(raw_manifest: &str) -> Result<PackageMap> {
        let mut packages = PackageMap::new();

        for (index, line) in raw_manifest.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let (Some(name), Some(version), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(AuditError::Parse {
                    context: "package manifest".to_string(),
                    details: format!(
                        "line {} is not a 'name<TAB>version' pair: {:?}",
                        index + 1,
                        line
                    ),
                }
                .into());
            };

            packages.insert(name.to_string(), version.to_string());
        }

        Ok(packages)
    }
}
