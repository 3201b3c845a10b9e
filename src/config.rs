//! Configuration file support for juju-cve-audit.
//!
//! Provides YAML-based configuration through `juju-cve-audit.config.yml`
//! files, including data structures, file loading, validation, and the
//! merge with command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::{DEFAULT_REFERENCE_DATA_URL, SERIES_PLACEHOLDER};
use crate::adapters::outbound::session::{SessionSettings, DEFAULT_TIMEOUT};
use crate::cve_audit::domain::Priority;
use crate::ports::outbound::LOCAL_HOST;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "juju-cve-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub user: Option<String>,
    pub timeout_secs: Option<u64>,
    pub reference_data_url: Option<String>,
    pub ssh_options: Option<Vec<String>>,
    pub fail_on: Option<Priority>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Values supplied on the command line; `None` falls back to the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub user: Option<String>,
    pub timeout_secs: Option<u64>,
    pub fail_on: Option<Priority>,
}

/// Effective settings after merging CLI flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub user: Option<String>,
    pub timeout: Duration,
    pub reference_data_url: String,
    pub ssh_options: Vec<String>,
    pub fail_on: Option<Priority>,
}

impl Settings {
    /// CLI flag > config file > built-in default.
    pub fn merge(cli: CliOverrides, config: ConfigFile) -> Self {
        Self {
            host: cli
                .host
                .or(config.host)
                .unwrap_or_else(|| LOCAL_HOST.to_string()),
            user: cli.user.or(config.user),
            timeout: cli
                .timeout_secs
                .or(config.timeout_secs)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            reference_data_url: config
                .reference_data_url
                .unwrap_or_else(|| DEFAULT_REFERENCE_DATA_URL.to_string()),
            ssh_options: config.ssh_options.unwrap_or_default(),
            fail_on: cli.fail_on.or(config.fail_on),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            doas: self.user.clone(),
            timeout: self.timeout,
            ssh_options: self.ssh_options.clone(),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(host) = &config.host {
        if host.trim().is_empty() {
            bail!(
                "Invalid config: host must not be empty.\n\n\
                 💡 Hint: Use \"local\" to run the Juju client on this machine."
            );
        }
    }
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than zero.\n\n\
             💡 Hint: Omit the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT.as_secs()
        );
    }
    if let Some(url) = &config.reference_data_url {
        if !url.contains(SERIES_PLACEHOLDER) {
            bail!(
                "Invalid config: reference_data_url must contain '{}'.\n\n\
                 💡 Hint: The placeholder is replaced with the release codename (e.g. \"focal\").",
                SERIES_PLACEHOLDER
            );
        }
    }
    if let Some(options) = &config.ssh_options {
        for (i, option) in options.iter().enumerate() {
            if !option.contains('=') {
                bail!(
                    "Invalid config: ssh_options[{}] must have the form Key=Value.\n\n\
                     💡 Hint: For example \"ConnectTimeout=10\".",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
