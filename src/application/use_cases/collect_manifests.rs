use super::lookup::locate_machine;
use crate::inventory::{Cloud, Machine, Selection};
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;

/// Raw package manifest of one machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineManifest {
    pub model: String,
    pub machine_id: String,
    pub hostname: String,
    pub slug: String,
    pub manifest: String,
}

impl MachineManifest {
    fn fetch(machine: &Machine) -> Result<Self> {
        Ok(Self {
            model: machine.model().to_string(),
            machine_id: machine.id().to_string(),
            hostname: machine.hostname()?.to_string(),
            slug: machine.slug(),
            manifest: machine.manifest()?,
        })
    }
}

/// CollectManifestsUseCase - fetches package manifests from machines
///
/// Manifests are handed to the caller one at a time, in traversal order,
/// so they can be written out before the next machine is contacted.
pub struct CollectManifestsUseCase<PR> {
    progress_reporter: PR,
}

impl<PR: ProgressReporter> CollectManifestsUseCase<PR> {
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Fetches the manifest of a single machine
    pub fn for_machine(
        &self,
        cloud: &Cloud,
        controller: &str,
        model: &str,
        machine_id: &str,
    ) -> Result<MachineManifest> {
        let machine = locate_machine(cloud, controller, model, machine_id)?;
        self.progress_reporter
            .report(&format!("📦 Fetching manifest of {}", machine.reference()));
        MachineManifest::fetch(machine)
    }

    /// Fetches the manifests of every machine in the selected models
    ///
    /// Stops at the first failure. Returns the number of manifests collected.
    pub fn for_selection<F>(&self, cloud: &Cloud, selection: &Selection, mut sink: F) -> Result<usize>
    where
        F: FnMut(MachineManifest) -> Result<()>,
    {
        let mut collected = 0;

        for model in cloud.filter(selection) {
            let model = model?;
            for machine in model.machines()? {
                self.progress_reporter
                    .report(&format!("📦 Fetching manifest of {}", machine.reference()));
                sink(MachineManifest::fetch(machine)?)?;
                collected += 1;
            }
        }

        self.progress_reporter
            .report_completion(&format!("✅ Collected {} manifest(s)", collected));
        Ok(collected)
    }
}
