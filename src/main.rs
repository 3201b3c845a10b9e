mod adapters;
mod application;
mod cli;
mod config;
mod cve_audit;
mod inventory;
mod logging;
mod ports;
mod shared;

use adapters::outbound::console::{ConsolePrinter, SilentProgressReporter, StderrProgressReporter};
use adapters::outbound::filesystem::ManifestDirectoryWriter;
use adapters::outbound::network::{CachingReferenceDataProvider, ReferenceDataClient};
use adapters::outbound::scanner::UctScanner;
use adapters::outbound::session::connect;
use anyhow::Context;
use application::dto::{AuditRequest, AuditResponse, AuditTarget};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::{AuditCvesUseCase, CollectManifestsUseCase, ListInventoryUseCase};
use cli::{Args, Command, ReportArgs};
use config::{CliOverrides, Settings};
use cve_audit::domain::Priority;
use inventory::Cloud;
use shared::error::{AuditError, ExitCode};
use shared::Result;
use std::process;

fn main() {
    // Parse command-line arguments (clap exits with code 2 on invalid arguments)
    let args = Args::parse_args();

    if let Err(e) = logging::init_tracing(args.verbose) {
        eprintln!("⚠️  Warning: {}", e);
    }

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args)?;
    tracing::debug!(host = %settings.host, user = ?settings.user, "resolved settings");

    // Create the session and the inventory root (Dependency Injection)
    let session = connect(&settings.host, settings.session_settings());
    session.open()?;
    let cloud = Cloud::new(session);

    if !cloud.has_juju()? {
        return Err(AuditError::NotFound {
            kind: "command".to_string(),
            name: format!("juju on {}", cloud.session().host()),
        }
        .into());
    }

    match args.command {
        Command::ListControllers => {
            for name in ListInventoryUseCase::controllers(&cloud)? {
                println!("{}", name);
            }
            Ok(ExitCode::Success)
        }
        Command::ListModels => {
            for name in ListInventoryUseCase::models(&cloud)? {
                println!("{}", name);
            }
            Ok(ExitCode::Success)
        }
        Command::GetManifest {
            machine,
            output,
            display,
        } => {
            let use_case = CollectManifestsUseCase::new(SilentProgressReporter);
            let manifest = use_case.for_machine(
                &cloud,
                &machine.controller,
                &machine.model,
                &machine.machine_id,
            )?;

            match output {
                Some(path) => PresenterFactory::create(PresenterType::File(path))
                    .present(&manifest.manifest)?,
                None => print!("{}", ConsolePrinter::new(display.is_fancy()).render_manifest(&manifest)),
            }
            Ok(ExitCode::Success)
        }
        Command::GetManifests {
            selection,
            output,
            display,
        } => {
            let selection = selection.to_selection();
            match output {
                Some(directory) => {
                    let writer = ManifestDirectoryWriter::new(directory)?;
                    let use_case = CollectManifestsUseCase::new(StderrProgressReporter::new());
                    let written = use_case.for_selection(&cloud, &selection, |manifest| {
                        let path = writer.write(&manifest.slug, &manifest.manifest)?;
                        tracing::info!(path = %path.display(), "manifest written");
                        Ok(())
                    })?;
                    eprintln!(
                        "✅ Wrote {} manifest(s) to {}",
                        written,
                        writer.directory().display()
                    );
                }
                None => {
                    let printer = ConsolePrinter::new(display.is_fancy());
                    let use_case = CollectManifestsUseCase::new(SilentProgressReporter);
                    use_case.for_selection(&cloud, &selection, |manifest| {
                        print!("{}", printer.render_manifest(&manifest));
                        Ok(())
                    })?;
                }
            }
            Ok(ExitCode::Success)
        }
        Command::Cves { selection, report } => audit(
            &cloud,
            &settings,
            AuditTarget::Selection(selection.to_selection()),
            &report,
        ),
        Command::CvesFor { machine, report } => audit(
            &cloud,
            &settings,
            AuditTarget::Machine {
                controller: machine.controller,
                model: machine.model,
                machine_id: machine.machine_id,
            },
            &report,
        ),
    }
}

fn audit(cloud: &Cloud, settings: &Settings, target: AuditTarget, report: &ReportArgs) -> Result<ExitCode> {
    let provider = CachingReferenceDataProvider::new(ReferenceDataClient::new(
        settings.reference_data_url.as_str(),
    )?);
    let use_case = AuditCvesUseCase::new(provider, UctScanner::new(), StderrProgressReporter::new());

    let request = AuditRequest::new(target, report.fixable_only);
    let response = use_case.execute(cloud, &request)?;

    if report.to_console() {
        let printer = ConsolePrinter::new(report.display.is_fancy());
        for machine_report in &response.reports {
            print!("{}", printer.render_report(machine_report));
        }
    } else {
        let format = report.format.unwrap_or_default();
        eprintln!("{}", FormatterFactory::progress_message(format));

        let formatted_output = FormatterFactory::create(format).format(&response.reports)?;
        PresenterFactory::create(PresenterType::from_output(report.output.clone()))
            .present(&formatted_output)?;
    }

    Ok(exit_code_for(&response, settings.fail_on))
}

/// Incomplete audits exit with an application error even when findings meet the threshold
fn exit_code_for(response: &AuditResponse, fail_on: Option<Priority>) -> ExitCode {
    if !response.failures.is_empty() {
        eprintln!(
            "❌ {} machine(s) could not be audited:",
            response.failures.len()
        );
        for failure in &response.failures {
            eprintln!("   {}: {}", failure.machine, failure.message);
        }
        return ExitCode::ApplicationError;
    }

    match fail_on {
        Some(threshold) if response.has_result_at_or_above(threshold) => {
            eprintln!("⚠️  Found CVEs at or above priority '{}'", threshold);
            ExitCode::VulnerabilitiesDetected
        }
        _ => ExitCode::Success,
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
            config::discover_config(&cwd)?.unwrap_or_default()
        }
    };

    let fail_on = match &args.command {
        Command::Cves { report, .. } | Command::CvesFor { report, .. } => report.fail_on,
        _ => None,
    };

    Ok(Settings::merge(
        CliOverrides {
            host: args.host.clone(),
            user: args.user.clone(),
            timeout_secs: args.timeout,
            fail_on,
        },
        config,
    ))
}
