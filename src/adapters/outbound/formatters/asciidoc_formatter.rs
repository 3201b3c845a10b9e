use crate::application::read_models::MachineReport;
use crate::cve_audit::domain::Priority;
use crate::cve_audit::policies::cve_links::id_to_adoc_link;
use crate::cve_audit::services::ScanPipeline;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// AsciiDoc table header for scan results
const TABLE_HEADER: &str = "|CVE |Priority |Package |Fixed Version |Repository\n";

/// AsciidocFormatter adapter: a document with one section per machine
///
/// Each section carries a priority tally followed by a results table whose
/// CVE identifiers link to the NVD.
pub struct AsciidocFormatter {
    revdate: String,
}

impl AsciidocFormatter {
    pub fn new() -> Self {
        Self::with_revdate(chrono::Local::now().format("%Y-%m-%d").to_string())
    }

    /// Uses a fixed revision date instead of today
    pub fn with_revdate(revdate: impl Into<String>) -> Self {
        Self {
            revdate: revdate.into(),
        }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_tally(output: &mut String, report: &MachineReport) {
        let tally = report.tally();
        let summary: Vec<String> = Priority::ALL
            .iter()
            .filter_map(|priority| tally.get(priority).map(|count| format!("{}: {}", priority, count)))
            .collect();

        if summary.is_empty() {
            output.push_str("No known vulnerabilities.\n\n");
        } else {
            output.push_str(&format!("*{}*\n\n", summary.join(", ")));
        }
    }

    fn render_section(output: &mut String, report: &MachineReport) {
        output.push_str(&format!(
            "== {} ({} machine {})\n\n",
            report.hostname, report.model, report.machine_id
        ));
        Self::render_tally(output, report);

        if report.results.is_empty() {
            return;
        }

        output.push_str("[cols=\"3,1,2,2,2\",options=\"header\"]\n|===\n");
        output.push_str(TABLE_HEADER);
        for result in ScanPipeline::map_ids(report.results.iter().cloned(), id_to_adoc_link) {
            output.push_str(&format!(
                "\n|{} |{} |{} |{} |{}\n",
                result.cve_id(),
                result.priority(),
                Self::escape_cell(result.package_name()),
                Self::escape_cell(result.fixed_version().unwrap_or("-")),
                Self::escape_cell(result.repository())
            ));
        }
        output.push_str("|===\n\n");
    }
}

impl Default for AsciidocFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for AsciidocFormatter {
    fn format(&self, reports: &[MachineReport]) -> Result<String> {
        let mut output = String::new();
        output.push_str("= CVE Audit Report\n");
        output.push_str(&format!(":revdate: {}\n", self.revdate));
        output.push_str(":toc:\n\n");

        for report in reports {
            Self::render_section(&mut output, report);
        }

        Ok(output)
    }
}
