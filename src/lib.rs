//! juju-cve-audit - CVE auditing for Juju-managed machines
//!
//! This library walks the controllers, models and machines known to a Juju
//! client, collects each machine's installed package manifest, and matches
//! it against the Ubuntu security tracker, following hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cve_audit`): Pure business logic: manifests, release
//!   inference, priorities and the scan result pipeline
//! - **Inventory** (`inventory`): The lazily listed Juju object tree
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use juju_cve_audit::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let session = connect("local", SessionSettings::default());
//! session.open()?;
//! let cloud = Cloud::new(session);
//!
//! let provider = CachingReferenceDataProvider::new(ReferenceDataClient::new(
//!     DEFAULT_REFERENCE_DATA_URL,
//! )?);
//! let use_case = AuditCvesUseCase::new(provider, UctScanner::new(), StderrProgressReporter::new());
//!
//! // Execute
//! let request = AuditRequest::new(AuditTarget::Selection(Selection::all().exclude_models(["controller"])), true);
//! let response = use_case.execute(&cloud, &request)?;
//!
//! // Format output
//! let output = CsvFormatter::new().format(&response.reports)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cve_audit;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{
        ConsolePrinter, SilentProgressReporter, StderrProgressReporter,
    };
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, ManifestDirectoryWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{AsciidocFormatter, CsvFormatter, JsonFormatter};
    pub use crate::adapters::outbound::network::{
        CachingReferenceDataProvider, ReferenceDataClient, DEFAULT_REFERENCE_DATA_URL,
    };
    pub use crate::adapters::outbound::scanner::{UctDatabase, UctScanner};
    pub use crate::adapters::outbound::session::{connect, LocalSession, SessionSettings, SshSession};
    pub use crate::application::dto::{AuditRequest, AuditResponse, AuditTarget, OutputFormat};
    pub use crate::application::read_models::MachineReport;
    pub use crate::application::use_cases::{
        AuditCvesUseCase, CollectManifestsUseCase, ListInventoryUseCase, MachineManifest,
    };
    pub use crate::cve_audit::domain::{DebianVersion, PackageMap, Priority, PriorityTally, ScanResult};
    pub use crate::cve_audit::policies::ReleaseCodenamePolicy;
    pub use crate::cve_audit::services::{ManifestParser, ScanPipeline};
    pub use crate::inventory::{Cloud, Controller, Machine, Model, ModelFilter, Selection};
    pub use crate::ports::outbound::{
        CommandOutput, OutputPresenter, ProgressReporter, ReferenceDataProvider, RemoteSession,
        ReportFormatter, RunOptions, VulnerabilityScanner,
    };
    pub use crate::shared::error::{AuditError, ExitCode};
    pub use crate::shared::Result;
}
