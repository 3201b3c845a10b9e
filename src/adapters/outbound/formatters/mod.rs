/// Formatter adapters for the report output formats
mod asciidoc_formatter;
mod csv_formatter;
mod json_formatter;

pub use asciidoc_formatter::AsciidocFormatter;
pub use csv_formatter::{CsvFormatter, CSV_HEADER};
pub use json_formatter::JsonFormatter;
