//! Typed records for the JSON documents printed by the Juju listing commands.
//!
//! Only the fields the inventory relies on are declared; everything else
//! in the documents is ignored. Maps keep the order of the document.

use crate::shared::error::AuditError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `juju list-controllers --format=json`
#[derive(Debug, Deserialize)]
pub struct ControllerListing {
    pub controllers: Map<String, Value>,
}

/// `juju list-models --format=json`
#[derive(Debug, Deserialize)]
pub struct ModelListing {
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(rename = "short-name")]
    pub short_name: String,
}

/// `juju list-machines --format=json`
#[derive(Debug, Deserialize)]
pub struct MachineListing {
    pub machines: Map<String, Value>,
}

/// Parses the output of a listing command
///
/// # Errors
/// Returns [`AuditError::Parse`] naming `command` when the output is not
/// valid JSON or lacks a required field.
pub fn parse_listing<T: DeserializeOwned>(command: &str, output: &str) -> Result<T> {
    serde_json::from_str(output).map_err(|e| {
        AuditError::Parse {
            context: format!("output of '{}'", command),
            details: e.to_string(),
        }
        .into()
    })
}
