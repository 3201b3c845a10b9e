/// Use cases module containing application orchestration
mod audit_cves;
mod collect_manifests;
mod list_inventory;
mod lookup;

pub use audit_cves::AuditCvesUseCase;
pub use collect_manifests::{CollectManifestsUseCase, MachineManifest};
pub use list_inventory::ListInventoryUseCase;
pub use lookup::{locate_machine, locate_model};
