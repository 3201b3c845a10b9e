use crate::inventory::{Cloud, Machine, Model};
use crate::shared::error::AuditError;
use crate::shared::Result;

/// Finds a model or fails with a user-facing "not found" error
pub fn locate_model<'a>(cloud: &'a Cloud, controller: &str, model: &str) -> Result<&'a Model> {
    cloud.find(controller, model)?.ok_or_else(|| {
        AuditError::NotFound {
            kind: "model".to_string(),
            name: format!("{}:{}", controller, model),
        }
        .into()
    })
}

/// Finds a machine or fails with a user-facing "not found" error
pub fn locate_machine<'a>(
    cloud: &'a Cloud,
    controller: &str,
    model: &str,
    machine_id: &str,
) -> Result<&'a Machine> {
    let model = locate_model(cloud, controller, model)?;
    model.find(machine_id)?.ok_or_else(|| {
        AuditError::NotFound {
            kind: "machine".to_string(),
            name: format!("{} in {}", machine_id, model),
        }
        .into()
    })
}
