use super::commands;
use super::listing::{parse_listing, ModelListing};
use super::Model;
use crate::ports::outbound::RemoteSession;
use crate::shared::Result;
use anyhow::Context;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A Juju controller reachable from the client host
pub struct Controller {
    name: String,
    session: Rc<dyn RemoteSession>,
    models: OnceCell<Vec<Model>>,
}

impl Controller {
    pub(crate) fn new(name: String, session: Rc<dyn RemoteSession>) -> Self {
        Self {
            name,
            session,
            models: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Models of this controller, listed once
    pub fn models(&self) -> Result<&[Model]> {
        if let Some(models) = self.models.get() {
            return Ok(models);
        }
        let loaded = self.load_models()?;
        Ok(self.models.get_or_init(|| loaded))
    }

    /// Looks up a model by full or short name
    pub fn find(&self, model_name: &str) -> Result<Option<&Model>> {
        Ok(self.models()?.iter().find(|m| m.is_named(model_name)))
    }

    fn load_models(&self) -> Result<Vec<Model>> {
        let command = commands::list_models(&self.name);
        tracing::debug!(controller = %self.name, "listing models");

        let output = self
            .session
            .run(&command)
            .with_context(|| format!("Failed to list models of controller {}", self.name))?;
        let listing: ModelListing = parse_listing(&command, &output.stdout)?;

        Ok(listing
            .models
            .into_iter()
            .map(|entry| {
                Model::new(
                    self.name.clone(),
                    entry.name,
                    entry.short_name,
                    Rc::clone(&self.session),
                )
            })
            .collect())
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller").field("name", &self.name).finish()
    }
}
