use crate::inventory::Cloud;
use crate::shared::Result;

/// ListInventoryUseCase - names of the controllers and models on a cloud
pub struct ListInventoryUseCase;

impl ListInventoryUseCase {
    pub fn controllers(cloud: &Cloud) -> Result<Vec<String>> {
        Ok(cloud
            .controllers()?
            .iter()
            .map(|controller| controller.name().to_string())
            .collect())
    }

    /// Display identities (`controller:model`) of every model, in traversal order
    pub fn models(cloud: &Cloud) -> Result<Vec<String>> {
        let mut models = Vec::new();
        for controller in cloud.controllers()? {
            models.extend(controller.models()?.iter().map(|model| model.display_name()));
        }
        Ok(models)
    }
}
