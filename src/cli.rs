use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::cve_audit::domain::Priority;
use crate::inventory::Selection;

/// Audit Juju-managed machines for known CVEs
#[derive(Parser, Debug)]
#[command(name = "juju-cve-audit")]
#[command(version)]
#[command(about = "Audit Juju-managed machines for known CVEs", long_about = None)]
pub struct Args {
    /// Host running the Juju client: "local" or an ssh destination
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Run commands as this user (via sudo) on the Juju client host
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a config file (defaults to ./juju-cve-audit.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for a single remote command
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the controllers known to the Juju client
    ListControllers,

    /// List every model as controller:model
    ListModels,

    /// Print or save the package manifest of one machine
    GetManifest {
        #[command(flatten)]
        machine: MachineArgs,

        /// Write the manifest to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Print or save the package manifests of the selected machines
    GetManifests {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Write one <slug>.manifest file per machine into this directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Scan the selected machines for CVEs
    Cves {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Scan one machine for CVEs
    CvesFor {
        #[command(flatten)]
        machine: MachineArgs,

        #[command(flatten)]
        report: ReportArgs,
    },
}

/// Address of a single machine
#[derive(ClapArgs, Debug, Clone)]
pub struct MachineArgs {
    /// Controller name
    #[arg(short, long)]
    pub controller: String,

    /// Model name, full (owner/name) or short
    #[arg(short, long)]
    pub model: String,

    /// Machine id within the model
    pub machine_id: String,
}

/// Include/exclude filters over controllers and models
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Only traverse these controllers
    #[arg(short = 'c', long = "controller", value_name = "CONTROLLER")]
    pub controllers: Vec<String>,

    /// Only traverse models with these names (full or short)
    #[arg(short = 'm', long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// Skip these controllers
    #[arg(short = 'C', long = "exclude-controller", value_name = "CONTROLLER")]
    pub exclude_controllers: Vec<String>,

    /// Skip models with these names (full or short)
    #[arg(short = 'M', long = "exclude-model", value_name = "MODEL")]
    pub exclude_models: Vec<String>,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> Selection {
        Selection::all()
            .include_controllers(self.controllers.iter().cloned())
            .include_models(self.models.iter().cloned())
            .exclude_controllers(self.exclude_controllers.iter().cloned())
            .exclude_models(self.exclude_models.iter().cloned())
    }
}

/// Console rendering switches
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct DisplayArgs {
    /// Draw colored tables (default)
    #[arg(long, overrides_with = "no_fancy")]
    pub fancy: bool,

    /// Print plain lines without colors
    #[arg(long = "no-fancy", overrides_with = "fancy")]
    pub no_fancy: bool,
}

impl DisplayArgs {
    pub fn is_fancy(&self) -> bool {
        !self.no_fancy
    }
}

/// Options shared by the CVE subcommands
#[derive(ClapArgs, Debug, Clone)]
pub struct ReportArgs {
    /// Write the report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format: csv, json or adoc (defaults to csv with --output)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Only report CVEs for which a fix is available
    #[arg(long)]
    pub fixable_only: bool,

    /// Exit with code 1 when a CVE at or above this priority is found
    #[arg(long, value_name = "PRIORITY")]
    pub fail_on: Option<Priority>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl ReportArgs {
    /// Console output is used unless a file or a format was requested
    pub fn to_console(&self) -> bool {
        self.output.is_none() && self.format.is_none()
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
