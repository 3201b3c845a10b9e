use crate::cve_audit::domain::{PackageMap, PriorityTally, ScanResult};
use crate::ports::outbound::{ReferenceDataProvider, VulnerabilityScanner};
use crate::shared::Result;
use anyhow::Context;

/// ScanPipeline - Produces and transforms per-machine scan results
///
/// `scan` delegates to the injected collaborators; every other operation
/// is a pure transform over a sequence of [`ScanResult`] values and can be
/// freely composed.
pub struct ScanPipeline;

impl ScanPipeline {
    /// Scans a package map for a release codename
    ///
    /// Reference data is requested for the release series named by
    /// `codename`; the provider is responsible for memoizing it.
    pub fn scan<P, S>(
        provider: &P,
        scanner: &S,
        codename: &str,
        packages: &PackageMap,
    ) -> Result<Vec<ScanResult>>
    where
        P: ReferenceDataProvider,
        S: VulnerabilityScanner<Data = P::Data>,
    {
        let data = provider
            .fetch(codename)
            .with_context(|| format!("Failed to obtain reference data for series '{}'", codename))?;
        scanner.scan(codename, &data, packages)
    }

    /// Sorts results by priority, most severe first
    ///
    /// The sort is stable: results of equal priority keep their relative order.
    pub fn sort_by_priority(mut results: Vec<ScanResult>) -> Vec<ScanResult> {
        results.sort_by_key(|result| result.priority());
        results
    }

    /// Keeps only results for which a fixed version exists
    pub fn filter_unpatched<I>(results: I) -> impl Iterator<Item = ScanResult>
    where
        I: IntoIterator<Item = ScanResult>,
    {
        results.into_iter().filter(ScanResult::has_fix)
    }

    /// Replaces every CVE identifier with `transform(cve_id)`
    pub fn map_ids<I, F>(results: I, transform: F) -> impl Iterator<Item = ScanResult>
    where
        I: IntoIterator<Item = ScanResult>,
        F: Fn(&str) -> String,
    {
        results
            .into_iter()
            .map(move |result| result.with_cve_id(transform(result.cve_id())))
    }

    /// Counts results per priority
    ///
    /// Priorities with no results are absent from the tally.
    pub fn tally<'a, I>(results: I) -> PriorityTally
    where
        I: IntoIterator<Item = &'a ScanResult>,
    {
        results.into_iter().fold(PriorityTally::new(), |mut tally, result| {
            *tally.entry(result.priority()).or_insert(0) += 1;
            tally
        })
    }
}
