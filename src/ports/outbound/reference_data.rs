use crate::shared::Result;
use std::sync::Arc;

/// ReferenceDataProvider port for obtaining vulnerability reference data
///
/// The data is opaque to the core: it is fetched by release series and
/// handed unchanged to a [`VulnerabilityScanner`](super::VulnerabilityScanner)
/// that declares the same `Data` type. Implementations are expected to be
/// memoized per series for the process lifetime (see
/// `CachingReferenceDataProvider`).
pub trait ReferenceDataProvider {
    /// Reference data type understood by the matching scanner
    type Data;

    /// Fetches the reference data for a release series (e.g. `"focal"`)
    ///
    /// # Errors
    /// Returns an error if the data cannot be downloaded, read, or parsed
    fn fetch(&self, series: &str) -> Result<Arc<Self::Data>>;
}
