//! CVE identifier transforms used with [`ScanPipeline::map_ids`].
//!
//! [`ScanPipeline::map_ids`]: crate::cve_audit::services::ScanPipeline::map_ids

const NVD_DETAIL_URL: &str = "https://nvd.nist.gov/vuln/detail/";

/// Returns the NVD detail page for a CVE identifier.
pub fn id_to_nvd_url(cve_id: &str) -> String {
    format!("{}{}", NVD_DETAIL_URL, urlencoding::encode(cve_id))
}

/// Returns an AsciiDoc link macro to the NVD page, labelled with the id.
pub fn id_to_adoc_link(cve_id: &str) -> String {
    format!("{}[{}]", id_to_nvd_url(cve_id), cve_id)
}

/// Returns an OSC 8 terminal hyperlink to the NVD page, labelled with the id.
pub fn id_to_terminal_link(cve_id: &str) -> String {
    format!(
        "\u{1b}]8;;{}\u{1b}\\{}\u{1b}]8;;\u{1b}\\",
        id_to_nvd_url(cve_id),
        cve_id
    )
}
