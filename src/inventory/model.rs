use super::commands;
use super::listing::{parse_listing, MachineListing};
use super::Machine;
use crate::ports::outbound::RemoteSession;
use crate::shared::Result;
use anyhow::Context;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A Juju model, identified as `controller:name`
pub struct Model {
    controller: String,
    name: String,
    short_name: String,
    session: Rc<dyn RemoteSession>,
    machines: OnceCell<Vec<Machine>>,
}

impl Model {
    pub(crate) fn new(
        controller: String,
        name: String,
        short_name: String,
        session: Rc<dyn RemoteSession>,
    ) -> Self {
        Self {
            controller,
            name,
            short_name,
            session,
            machines: OnceCell::new(),
        }
    }

    /// Name of the owning controller
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Full model name, e.g. `admin/openstack`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short model name, e.g. `openstack`
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Display identity: `controller:name`
    pub fn display_name(&self) -> String {
        format!("{}:{}", self.controller, self.name)
    }

    /// Returns true when `name` is either the full or the short name
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name || self.short_name == name
    }

    /// Machines of this model, listed once
    pub fn machines(&self) -> Result<&[Machine]> {
        if let Some(machines) = self.machines.get() {
            return Ok(machines);
        }
        let loaded = self.load_machines()?;
        Ok(self.machines.get_or_init(|| loaded))
    }

    /// Looks up a machine by id; `None` when the model has no such machine
    pub fn find(&self, machine_id: &str) -> Result<Option<&Machine>> {
        Ok(self.machines()?.iter().find(|m| m.id() == machine_id))
    }

    fn load_machines(&self) -> Result<Vec<Machine>> {
        let qualified = self.display_name();
        let command = commands::list_machines(&qualified);
        tracing::debug!(model = %qualified, "listing machines");

        let output = self
            .session
            .run(&command)
            .with_context(|| format!("Failed to list machines of model {}", qualified))?;
        let listing: MachineListing = parse_listing(&command, &output.stdout)?;

        Ok(listing
            .machines
            .into_iter()
            .map(|(id, _)| Machine::new(id, qualified.clone(), Rc::clone(&self.session)))
            .collect())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.controller, self.name)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("controller", &self.controller)
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .finish()
    }
}
