//! Command strings issued against the Juju client host.
//!
//! Variable parts are always passed through [`quote`].

use crate::shared::shell::quote;

pub const LIST_CONTROLLERS: &str = "juju list-controllers --format=json";
pub const HOSTNAME: &str = "hostname";
pub const MANIFEST: &str = "dpkg-query -W";
pub const WHOAMI: &str = "whoami";
pub const WHICH_JUJU: &str = "which juju";

pub fn list_models(controller: &str) -> String {
    format!("juju list-models --format=json --controller={}", quote(controller))
}

/// `model` is the `controller:model` display identity.
pub fn list_machines(model: &str) -> String {
    format!("juju list-machines --format=json --model={}", quote(model))
}

/// Wraps `inner` so it runs on a machine through `juju ssh`.
pub fn on_machine(model: &str, machine_id: &str, inner: &str) -> String {
    format!(
        "juju ssh --model={} {} -- {}",
        quote(model),
        quote(machine_id),
        inner
    )
}
