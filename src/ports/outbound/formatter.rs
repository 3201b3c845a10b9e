use crate::application::read_models::MachineReport;
use crate::shared::Result;

/// ReportFormatter port for serializing scan results
///
/// This port abstracts the output representation of per-machine scan
/// results (CSV, JSON keyed by slug, AsciiDoc, etc.).
pub trait ReportFormatter {
    /// Formats the scan results of every machine into one document
    ///
    /// # Arguments
    /// * `reports` - Per-machine results in traversal order
    ///
    /// # Returns
    /// Formatted report content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, reports: &[MachineReport]) -> Result<String>;
}
