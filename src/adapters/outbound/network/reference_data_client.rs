use crate::adapters::outbound::scanner::UctDatabase;
use crate::ports::outbound::ReferenceDataProvider;
use crate::shared::error::AuditError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_REFERENCE_DATA_SIZE};
use crate::shared::Result;
use bzip2::read::BzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default location of the per-series tracker database
pub const DEFAULT_REFERENCE_DATA_URL: &str =
    "https://people.canonical.com/~ubuntu-security/cvescan/ubuntu-vuln-db-{series}.json.bz2";

/// Placeholder replaced with the release codename
pub const SERIES_PLACEHOLDER: &str = "{series}";

/// Locations ending with this suffix hold bzip2-compressed JSON
const COMPRESSED_SUFFIX: &str = ".bz2";

/// ReferenceDataClient fetches the tracker database for a release series
///
/// The source is a template containing `{series}`. `http://` and `https://`
/// templates are downloaded; anything else is read as a local path.
/// Locations ending in `.bz2` are decompressed before parsing.
///
/// # Security
/// - Downloads are bounded by a timeout
/// - Local files must be regular files (no symlinks) within a size limit
/// - Decompressed data is held to the same size limit
/// - The series must be a plain lowercase codename
pub struct ReferenceDataClient {
    client: Client,
    source: String,
}

impl ReferenceDataClient {
    const TIMEOUT_SECONDS: u64 = 120;

    pub fn new(source: impl Into<String>) -> Result<Self> {
        let user_agent = format!("juju-cve-audit/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            source: source.into(),
        })
    }

    /// Location of the database for `series`
    pub fn location(&self, series: &str) -> Result<String> {
        if series.is_empty() || !series.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(AuditError::Validation {
                message: format!("Invalid release series: '{}'", series),
            }
            .into());
        }
        Ok(self.source.replace(SERIES_PLACEHOLDER, series))
    }

    fn is_remote(location: &str) -> bool {
        location.starts_with("https://") || location.starts_with("http://")
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!(%url, "downloading reference data");
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            anyhow::bail!("Reference data server returned status code {} for {}", response.status(), url);
        }

        Ok(response.bytes()?.to_vec())
    }

    fn read_file(path: &Path) -> Result<Vec<u8>> {
        tracing::info!(path = %path.display(), "reading reference data");
        validate_regular_file(path, "reference data")?;
        let size = fs::metadata(path)?.len();
        validate_file_size(size, path, MAX_REFERENCE_DATA_SIZE)?;
        Ok(fs::read(path)?)
    }

    fn decompress(raw: &[u8], location: &str) -> Result<Vec<u8>> {
        let mut decoded = Vec::new();
        BzDecoder::new(raw)
            .take(MAX_REFERENCE_DATA_SIZE + 1)
            .read_to_end(&mut decoded)
            .map_err(|e| AuditError::Parse {
                context: format!("compressed reference data from {}", location),
                details: e.to_string(),
            })?;
        validate_file_size(decoded.len() as u64, Path::new(location), MAX_REFERENCE_DATA_SIZE)?;
        tracing::debug!(compressed = raw.len(), decompressed = decoded.len(), "reference data decompressed");
        Ok(decoded)
    }
}

impl ReferenceDataProvider for ReferenceDataClient {
    type Data = UctDatabase;

    fn fetch(&self, series: &str) -> Result<Arc<UctDatabase>> {
        let location = self.location(series)?;

        let raw = if Self::is_remote(&location) {
            self.download(&location)?
        } else {
            let path = location.strip_prefix("file://").unwrap_or(&location);
            Self::read_file(Path::new(path))?
        };
        let raw = if location.ends_with(COMPRESSED_SUFFIX) {
            Self::decompress(&raw, &location)?
        } else {
            raw
        };

        let database: UctDatabase = serde_json::from_slice(&raw).map_err(|e| AuditError::Parse {
            context: format!("reference data from {}", location),
            details: e.to_string(),
        })?;
        tracing::debug!(series, records = database.records.len(), "reference data loaded");

        Ok(Arc::new(database))
    }
}
