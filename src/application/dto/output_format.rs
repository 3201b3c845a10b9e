/// Output format enumeration for CVE reports
///
/// Both the CLI and the formatter factory need to understand this, so it
/// lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One row per (machine, result) pair (default)
    #[default]
    Csv,
    /// Object keyed by machine slug
    Json,
    /// AsciiDoc document with one section per machine
    Adoc,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "adoc" | "asciidoc" => Ok(OutputFormat::Adoc),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'csv', 'json' or 'adoc'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Adoc => write!(f, "adoc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("adoc").unwrap(), OutputFormat::Adoc);
        assert_eq!(OutputFormat::from_str("asciidoc").unwrap(), OutputFormat::Adoc);
    }

    #[test]
    fn test_output_format_from_str_case_insensitive() {
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("Json").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("pdf").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("pdf"));
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Adoc] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }

    #[test]
    fn test_default_is_csv() {
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }
}
