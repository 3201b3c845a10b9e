//! Lazy Juju inventory: cloud, controllers, models and machines.
//!
//! Each level is listed through the shared [`RemoteSession`] the first
//! time it is visited and kept for the lifetime of the [`Cloud`]. Children
//! keep a copy of their parent's identity and a handle to the session.
//!
//! [`RemoteSession`]: crate::ports::outbound::RemoteSession

mod cloud;
pub mod commands;
mod controller;
mod listing;
mod machine;
mod model;
mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use cloud::Cloud;
pub use controller::Controller;
pub use machine::Machine;
pub use model::Model;
pub use selection::{ModelFilter, Selection};
