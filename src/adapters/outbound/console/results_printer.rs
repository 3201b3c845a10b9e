use crate::application::read_models::MachineReport;
use crate::application::use_cases::MachineManifest;
use crate::cve_audit::domain::{Priority, ScanResult};
use crate::cve_audit::policies::cve_links::id_to_terminal_link;
use crate::cve_audit::services::ScanPipeline;
use owo_colors::OwoColorize;

const RESULT_HEADERS: [&str; 5] = ["CVE", "Priority", "Package", "Fixed Version", "Repository"];
const MANIFEST_HEADERS: [&str; 2] = ["Package", "Version"];

/// ConsolePrinter renders reports and manifests for a terminal
///
/// Fancy output draws aligned, colored tables with hyperlinked CVE ids;
/// plain output is one uncolored line per entry.
pub struct ConsolePrinter {
    fancy: bool,
}

impl ConsolePrinter {
    pub fn new(fancy: bool) -> Self {
        Self { fancy }
    }

    pub fn render_report(&self, report: &MachineReport) -> String {
        if self.fancy {
            Self::render_report_fancy(report)
        } else {
            Self::render_report_plain(report)
        }
    }

    pub fn render_manifest(&self, manifest: &MachineManifest) -> String {
        if !self.fancy {
            return manifest.manifest.clone();
        }

        let rows: Vec<Vec<String>> = manifest
            .manifest
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (package, version) = line.split_once('\t').unwrap_or((line, ""));
                vec![package.to_string(), version.to_string()]
            })
            .collect();

        let mut output = format!("{}\n", manifest.hostname.bold().green());
        output.push_str(&render_table(&MANIFEST_HEADERS, &rows, |_, _, cell| cell.to_string()));
        output
    }

    fn title(report: &MachineReport) -> String {
        format!("💻 {} in {}", report.hostname, report.model)
    }

    fn render_report_plain(report: &MachineReport) -> String {
        let mut output = format!("{}\n", Self::title(report));
        for result in &report.results {
            output.push_str(&format!(
                "{} | {} | {} | fixed in: {} | repo: {}\n",
                result.cve_id(),
                result.priority(),
                result.package_name(),
                result.fixed_version().unwrap_or("-"),
                result.repository()
            ));
        }
        output
    }

    fn render_report_fancy(report: &MachineReport) -> String {
        let mut output = format!(
            "{} in {}\n",
            format!("💻 {}", report.hostname).bold().green(),
            report.model.purple()
        );

        // Widths come from the plain ids; the linked ones are only displayed
        let rows: Vec<Vec<String>> = report.results.iter().map(result_cells).collect();
        let linked: Vec<ScanResult> =
            ScanPipeline::map_ids(report.results.iter().cloned(), id_to_terminal_link).collect();
        output.push_str(&render_table(&RESULT_HEADERS, &rows, |row, column, cell| match column {
            0 => linked
                .get(row)
                .map_or(cell, |result| result.cve_id())
                .bold()
                .cyan()
                .to_string(),
            1 => colorize_priority(cell),
            _ => cell.green().to_string(),
        }));

        let tally = report.tally();
        let summary: Vec<String> = Priority::ALL
            .iter()
            .filter_map(|p| tally.get(p).map(|count| format!("{} {}", count, p)))
            .collect();
        if summary.is_empty() {
            output.push_str(&format!("{}\n", "no known vulnerabilities".dimmed()));
        } else {
            output.push_str(&format!("{}\n", summary.join(", ").dimmed()));
        }
        output
    }
}

fn result_cells(result: &ScanResult) -> Vec<String> {
    vec![
        result.cve_id().to_string(),
        result.priority().to_string(),
        result.package_name().to_string(),
        result.fixed_version().unwrap_or("-").to_string(),
        result.repository().to_string(),
    ]
}

fn colorize_priority(cell: &str) -> String {
    match cell.parse::<Priority>() {
        Ok(Priority::Critical) => cell.red().bold().to_string(),
        Ok(Priority::High) => cell.red().to_string(),
        Ok(Priority::Medium) => cell.yellow().to_string(),
        _ => cell.to_string(),
    }
}

/// Renders rows padded to the widest plain cell of each column
///
/// `style` receives the row index, column index and plain cell. It runs after
/// padding has been computed, so escape sequences do not disturb alignment.
fn render_table<F>(headers: &[&str], rows: &[Vec<String>], style: F) -> String
where
    F: Fn(usize, usize, &str) -> String,
{
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let pad = |text: &str, width: usize| " ".repeat(width.saturating_sub(text.chars().count()));

    let mut output = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{}{}", header.bold(), pad(header, *width)))
        .collect();
    output.push_str(&header_line.join("  "));
    output.push('\n');

    for (index, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(column, (cell, width))| format!("{}{}", style(index, column, cell), pad(cell, *width)))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output
}
