use crate::adapters::outbound::formatters::{AsciidocFormatter, CsvFormatter, JsonFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Encapsulates the choice of formatter adapter for an output format. It
/// belongs in the application layer as it selects infrastructure adapters
/// based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use juju_cve_audit::application::dto::OutputFormat;
    /// use juju_cve_audit::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Csv);
    /// let csv = formatter.format(&[]).unwrap();
    /// assert!(csv.starts_with("Model,Machine ID"));
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Csv => Box::new(CsvFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Adoc => Box::new(AsciidocFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Csv => "📝 Generating CSV output...",
            OutputFormat::Json => "📝 Generating JSON output...",
            OutputFormat::Adoc => "📝 Generating AsciiDoc output...",
        }
    }
}
