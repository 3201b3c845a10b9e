use crate::application::read_models::MachineReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

/// JsonFormatter adapter: an object keyed by machine slug
///
/// Each value is that machine's result list; result fields keep their
/// declaration order. Machines appear in traversal order.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, reports: &[MachineReport]) -> Result<String> {
        let mut document = Map::new();
        for report in reports {
            document.insert(report.slug.clone(), serde_json::to_value(&report.results)?);
        }

        let mut buffer = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        Value::Object(document).serialize(&mut serializer)?;
        buffer.push(b'\n');

        Ok(String::from_utf8(buffer)?)
    }
}
