use crate::application::read_models::MachineReport;
use crate::cve_audit::domain::{Priority, PriorityTally};
use crate::inventory::Selection;

/// Which machines an audit covers
#[derive(Debug, Clone)]
pub enum AuditTarget {
    /// Every machine of every selected model
    Selection(Selection),
    /// One machine, addressed by controller, model (full or short name) and id
    Machine {
        controller: String,
        model: String,
        machine_id: String,
    },
}

/// Request for the CVE audit use case
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub target: AuditTarget,
    /// Only report results for which a fix has been published
    pub fixable_only: bool,
}

impl AuditRequest {
    pub fn new(target: AuditTarget, fixable_only: bool) -> Self {
        Self {
            target,
            fixable_only,
        }
    }
}

/// A machine whose audit failed without stopping the others
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineFailure {
    /// `-m controller:model id` reference
    pub machine: String,
    pub message: String,
}

/// Reports in traversal order plus the machines that could not be audited
#[derive(Debug, Clone, Default)]
pub struct AuditResponse {
    pub reports: Vec<MachineReport>,
    pub failures: Vec<MachineFailure>,
}

impl AuditResponse {
    /// Returns true when any reported result is at least as severe as `threshold`
    pub fn has_result_at_or_above(&self, threshold: Priority) -> bool {
        self.reports
            .iter()
            .flat_map(|report| &report.results)
            .any(|result| result.priority().meets_threshold(threshold))
    }

    /// Results per priority across every report
    pub fn tally(&self) -> PriorityTally {
        self.reports
            .iter()
            .flat_map(|report| report.tally())
            .fold(PriorityTally::new(), |mut tally, (priority, count)| {
                *tally.entry(priority).or_insert(0) += count;
                tally
            })
    }

    pub fn result_count(&self) -> usize {
        self.reports.iter().map(|report| report.results.len()).sum()
    }
}
