use crate::cve_audit::domain::{PriorityTally, ScanResult};
use crate::cve_audit::services::ScanPipeline;
use crate::inventory::Machine;
use crate::shared::shell::slugify;
use crate::shared::Result;

/// Scan results of one machine together with the machine context
/// every output format repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineReport {
    /// `controller:model` display identity
    pub model: String,
    pub machine_id: String,
    pub hostname: String,
    pub slug: String,
    pub results: Vec<ScanResult>,
}

impl MachineReport {
    pub fn new(
        model: impl Into<String>,
        machine_id: impl Into<String>,
        hostname: impl Into<String>,
        results: Vec<ScanResult>,
    ) -> Self {
        let model = model.into();
        let machine_id = machine_id.into();
        let slug = slugify(&format!("{}.{}", model, machine_id));
        Self {
            model,
            machine_id,
            hostname: hostname.into(),
            slug,
            results,
        }
    }

    /// Builds the report for `machine`, fetching its hostname if needed
    pub fn for_machine(machine: &Machine, results: Vec<ScanResult>) -> Result<Self> {
        Ok(Self::new(
            machine.model(),
            machine.id(),
            machine.hostname()?,
            results,
        ))
    }

    pub fn tally(&self) -> PriorityTally {
        ScanPipeline::tally(&self.results)
    }
}
