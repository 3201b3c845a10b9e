use super::commands;
use super::listing::{parse_listing, ControllerListing};
use super::selection::ModelFilter;
use super::{Controller, Model, Selection};
use crate::ports::outbound::{RemoteSession, RunOptions};
use crate::shared::Result;
use anyhow::Context;
use std::cell::OnceCell;
use std::rc::Rc;

/// Root of the inventory: the Juju client host behind a [`RemoteSession`]
///
/// Controllers are listed at most once per `Cloud`; later changes on the
/// remote side are not observed.
pub struct Cloud {
    session: Rc<dyn RemoteSession>,
    controllers: OnceCell<Vec<Controller>>,
    hostname: OnceCell<String>,
    has_juju: OnceCell<bool>,
}

impl Cloud {
    pub fn new(session: Rc<dyn RemoteSession>) -> Self {
        Self {
            session,
            controllers: OnceCell::new(),
            hostname: OnceCell::new(),
            has_juju: OnceCell::new(),
        }
    }

    pub fn session(&self) -> &dyn RemoteSession {
        self.session.as_ref()
    }

    pub fn controllers(&self) -> Result<&[Controller]> {
        if let Some(controllers) = self.controllers.get() {
            return Ok(controllers);
        }
        let loaded = self.load_controllers()?;
        Ok(self.controllers.get_or_init(|| loaded))
    }

    /// Hostname of the client host
    pub fn hostname(&self) -> Result<&str> {
        if let Some(hostname) = self.hostname.get() {
            return Ok(hostname);
        }
        let fetched = self.session.run(commands::HOSTNAME)?.stdout.trim().to_string();
        Ok(self.hostname.get_or_init(|| fetched))
    }

    /// Returns true when a `juju` client is on the host's `PATH`
    pub fn has_juju(&self) -> Result<bool> {
        if let Some(found) = self.has_juju.get() {
            return Ok(*found);
        }
        let output = self
            .session
            .run_with(commands::WHICH_JUJU, &RunOptions::allow_failure())?;
        Ok(*self.has_juju.get_or_init(|| output.success()))
    }

    /// Identity commands run as on the host
    pub fn whoami(&self) -> Result<String> {
        Ok(self.session.run(commands::WHOAMI)?.stdout.trim().to_string())
    }

    /// Lazily walks every model matching `selection`
    pub fn filter<'a>(&'a self, selection: &'a Selection) -> ModelFilter<'a> {
        ModelFilter::new(self, selection)
    }

    /// Finds a model by exact controller name and full or short model name
    pub fn find(&self, controller_name: &str, model_name: &str) -> Result<Option<&Model>> {
        for controller in self.controllers()? {
            if controller.name() == controller_name {
                if let Some(model) = controller.find(model_name)? {
                    return Ok(Some(model));
                }
            }
        }
        Ok(None)
    }

    fn load_controllers(&self) -> Result<Vec<Controller>> {
        let command = commands::LIST_CONTROLLERS;
        tracing::debug!(host = %self.session.host(), "listing controllers");

        let output = self
            .session
            .run(command)
            .with_context(|| format!("Failed to list controllers on {}", self.session.host()))?;
        let listing: ControllerListing = parse_listing(command, &output.stdout)?;

        Ok(listing
            .controllers
            .into_iter()
            .map(|(name, _)| Controller::new(name, Rc::clone(&self.session)))
            .collect())
    }
}
