use crate::application::read_models::MachineReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Column headers, in row order
pub const CSV_HEADER: [&str; 8] = [
    "Model",
    "Machine ID",
    "Hostname",
    "CVE",
    "Priority",
    "Package Name",
    "Fixed Version",
    "Repository",
];

/// CsvFormatter adapter: one row per (machine, result) pair
///
/// The machine context is repeated on every row. Fields are quoted per
/// RFC 4180 only when needed; a missing fixed version is an empty field.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_row<'a>(output: &mut String, fields: impl IntoIterator<Item = &'a str>) {
        let row: Vec<String> = fields.into_iter().map(Self::escape_field).collect();
        output.push_str(&row.join(","));
        output.push('\n');
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, reports: &[MachineReport]) -> Result<String> {
        let mut output = String::new();
        Self::push_row(&mut output, CSV_HEADER);

        for report in reports {
            for result in &report.results {
                Self::push_row(
                    &mut output,
                    [
                        report.model.as_str(),
                        report.machine_id.as_str(),
                        report.hostname.as_str(),
                        result.cve_id(),
                        result.priority().as_str(),
                        result.package_name(),
                        result.fixed_version().unwrap_or_default(),
                        result.repository(),
                    ],
                );
            }
        }

        Ok(output)
    }
}
