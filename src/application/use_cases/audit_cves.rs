use super::lookup::locate_machine;
use crate::application::dto::{AuditRequest, AuditResponse, AuditTarget, MachineFailure};
use crate::application::read_models::MachineReport;
use crate::cve_audit::services::ScanPipeline;
use crate::inventory::{Cloud, Machine};
use crate::ports::outbound::{ProgressReporter, ReferenceDataProvider, VulnerabilityScanner};
use crate::shared::Result;

/// AuditCvesUseCase - scans machines for known CVEs
///
/// Failures while scanning one machine are recorded in the response and
/// the audit moves on to the next machine. Failures listing controllers,
/// models or machines end the audit.
///
/// # Type Parameters
/// * `P` - ReferenceDataProvider implementation
/// * `S` - VulnerabilityScanner implementation over the provider's data
/// * `PR` - ProgressReporter implementation
pub struct AuditCvesUseCase<P, S, PR> {
    provider: P,
    scanner: S,
    progress_reporter: PR,
}

impl<P, S, PR> AuditCvesUseCase<P, S, PR>
where
    P: ReferenceDataProvider,
    S: VulnerabilityScanner<Data = P::Data>,
    PR: ProgressReporter,
{
    pub fn new(provider: P, scanner: S, progress_reporter: PR) -> Self {
        Self {
            provider,
            scanner,
            progress_reporter,
        }
    }

    pub fn execute(&self, cloud: &Cloud, request: &AuditRequest) -> Result<AuditResponse> {
        let mut response = AuditResponse::default();

        match &request.target {
            AuditTarget::Machine {
                controller,
                model,
                machine_id,
            } => {
                let machine = locate_machine(cloud, controller, model, machine_id)?;
                self.audit_into(machine, request, &mut response);
            }
            AuditTarget::Selection(selection) => {
                for model in cloud.filter(selection) {
                    for machine in model?.machines()? {
                        self.audit_into(machine, request, &mut response);
                    }
                }
            }
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Audited {} machine(s): {} result(s), {} failure(s)",
            response.reports.len(),
            response.result_count(),
            response.failures.len()
        ));
        Ok(response)
    }

    /// Scans one machine; results are sorted by priority
    pub fn audit_machine(&self, machine: &Machine, fixable_only: bool) -> Result<MachineReport> {
        let results = ScanPipeline::sort_by_priority(machine.cves(&self.provider, &self.scanner)?);
        let results = if fixable_only {
            ScanPipeline::filter_unpatched(results).collect()
        } else {
            results
        };
        MachineReport::for_machine(machine, results)
    }

    fn audit_into(&self, machine: &Machine, request: &AuditRequest, response: &mut AuditResponse) {
        self.progress_reporter
            .report(&format!("🔍 Scanning {}", machine.reference()));

        match self.audit_machine(machine, request.fixable_only) {
            Ok(report) => response.reports.push(report),
            Err(e) => {
                tracing::warn!(machine = %machine.reference(), error = %format!("{:#}", e), "scan failed");
                self.progress_reporter
                    .report_error(&format!("❌ {}: {:#}", machine.reference(), e));
                response.failures.push(MachineFailure {
                    machine: machine.reference(),
                    message: format!("{:#}", e),
                });
            }
        }
    }
}
