//! End-to-end tests for the CLI
//!
//! A stub `juju` script is placed first on `PATH` and answers the listing
//! and `juju ssh` commands for a single machine. Reference data is read
//! from a local file configured through `--config`.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("juju-cve-audit").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("juju-cve-audit").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("juju-cve-audit")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("juju-cve-audit").assert().code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("juju-cve-audit")
            .args(["cves", "-f", "xml"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid priority value
    #[test]
    fn test_exit_code_invalid_priority() {
        cargo_bin_cmd!("juju-cve-audit")
            .args(["cves", "--fail-on", "urgent"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Zero timeout
    #[test]
    fn test_exit_code_zero_timeout() {
        cargo_bin_cmd!("juju-cve-audit")
            .args(["list-models", "--timeout", "0"])
            .assert()
            .code(2);
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

const STUB_JUJU: &str = r#"#!/bin/sh
case "$*" in
  "list-controllers --format=json")
    echo '{"controllers": {"prod": {"uuid": "1"}}}' ;;
  "list-models --format=json --controller=prod")
    echo '{"models": [{"name": "admin/openstack", "short-name": "openstack"}]}' ;;
  "list-machines --format=json --model=prod:admin/openstack")
    echo '{"machines": {"0": {}}}' ;;
  "ssh --model=prod:admin/openstack 0 -- hostname")
    echo compute-0 ;;
  "ssh --model=prod:admin/openstack 0 -- dpkg-query -W")
    printf 'bash\t5.0-6ubuntu1.1\nlibssl1.1\t1.1.1f-1ubuntu2.16\nupdate-manager-core\t1:20.04.10\n' ;;
  *)
    echo "ERROR unexpected arguments: $*" >&2
    exit 1 ;;
esac
"#;

const FOCAL_DATABASE: &str = r#"{
    "CVE-2023-0286": {"priority": "high", "releases": {"focal": {"openssl": {
        "status": ["released", "1.1.1f-1ubuntu2.17"],
        "binaries": {"libssl1.1": "1.1.1f-1ubuntu2.17"}}}}},
    "CVE-2022-3715": {"priority": "low", "releases": {"focal": {"bash": {
        "status": ["needed"],
        "binaries": {"bash": ""}}}}}
}"#;

/// Temporary environment with a stub `juju`, reference data and a config file
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir(&bin).unwrap();
        write_executable(&bin.join("juju"), STUB_JUJU);

        fs::write(dir.path().join("db-focal.json"), FOCAL_DATABASE).unwrap();
        fs::write(
            dir.path().join("config.yml"),
            format!(
                "reference_data_url: \"{}/db-{{series}}.json\"\n",
                dir.path().display()
            ),
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("juju-cve-audit");
        cmd.current_dir(self.path())
            .env("PATH", format!("{}:/usr/bin:/bin", self.path().join("bin").display()))
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.path().join("config.yml"));
        cmd
    }

    fn output_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

// ============================================================================
// Inventory
// ============================================================================

#[test]
fn test_list_controllers() {
    Fixture::new()
        .command()
        .arg("list-controllers")
        .assert()
        .code(0)
        .stdout("prod\n");
}

#[test]
fn test_list_models() {
    Fixture::new()
        .command()
        .arg("list-models")
        .assert()
        .code(0)
        .stdout("prod:admin/openstack\n");
}

#[test]
fn test_missing_juju_is_application_error() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("juju-cve-audit")
        .current_dir(dir.path())
        .env("PATH", "/usr/bin:/bin")
        .arg("list-models")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("juju on local"));
}

#[test]
fn test_unknown_model_is_application_error() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["cves-for", "-c", "stage", "-m", "k8s", "0"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not find the specified model"));
}

// ============================================================================
// Manifests
// ============================================================================

#[test]
fn test_get_manifest_plain() {
    Fixture::new()
        .command()
        .args(["get-manifest", "-c", "prod", "-m", "openstack", "--no-fancy", "0"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("update-manager-core\t1:20.04.10"));
}

#[test]
fn test_get_manifests_to_directory() {
    let fixture = Fixture::new();
    let out_dir = fixture.output_path("manifests");
    fs::create_dir(&out_dir).unwrap();

    fixture
        .command()
        .args(["get-manifests", "-o"])
        .arg(&out_dir)
        .assert()
        .code(0);

    let manifest = fs::read_to_string(out_dir.join("prod-admin-openstack-0.manifest")).unwrap();
    assert!(manifest.starts_with("bash\t5.0-6ubuntu1.1\n"));
}

// ============================================================================
// CVE reports
// ============================================================================

#[test]
fn test_cves_csv_to_stdout() {
    Fixture::new()
        .command()
        .args(["cves", "-f", "csv"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with(
            "Model,Machine ID,Hostname,CVE,Priority,Package Name,Fixed Version,Repository\n",
        ))
        .stdout(predicate::str::contains(
            "prod:admin/openstack,0,compute-0,CVE-2023-0286,high,libssl1.1,1.1.1f-1ubuntu2.17,Ubuntu Archive",
        ))
        .stdout(predicate::str::contains("CVE-2022-3715,low,bash,,Ubuntu Archive"));
}

#[test]
fn test_cves_plain_console() {
    Fixture::new()
        .command()
        .args(["cves", "--no-fancy", "--fixable-only"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("💻 compute-0 in prod:admin/openstack"))
        .stdout(predicate::str::contains(
            "CVE-2023-0286 | high | libssl1.1 | fixed in: 1.1.1f-1ubuntu2.17 | repo: Ubuntu Archive",
        ))
        .stdout(predicate::str::contains("CVE-2022-3715").not());
}

#[test]
fn test_cves_for_json_file() {
    let fixture = Fixture::new();
    let output = fixture.output_path("report.json");

    fixture
        .command()
        .args(["cves-for", "-c", "prod", "-m", "admin/openstack", "0", "-f", "json", "-o"])
        .arg(&output)
        .assert()
        .code(0);

    let content = fs::read_to_string(&output).unwrap();
    let document: serde_json::Value = serde_json::from_str(&content).unwrap();
    let results = document["prod-admin-openstack-0"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["cve_id"], "CVE-2023-0286");
    assert_eq!(results[1]["fixed_version"], serde_json::Value::Null);
}

#[test]
fn test_cves_fail_on_threshold() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["cves", "-f", "csv", "--fail-on", "high"])
        .assert()
        .code(1);

    fixture
        .command()
        .args(["cves", "-f", "csv", "--fail-on", "critical"])
        .assert()
        .code(0);
}

#[test]
fn test_cves_missing_reference_data_is_application_error() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.path().join("db-focal.json")).unwrap();

    fixture
        .command()
        .args(["cves", "-f", "csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("-m prod:admin/openstack 0"));
}

#[test]
fn test_config_file_is_discovered() {
    let fixture = Fixture::new();
    fs::write(
        fixture.path().join("juju-cve-audit.config.yml"),
        "host: local\nfail_on: low\nreference_data_url: \"file://{series}.json\"\n",
    )
    .unwrap();
    fs::copy(fixture.path().join("db-focal.json"), fixture.path().join("focal.json")).unwrap();

    let mut cmd = cargo_bin_cmd!("juju-cve-audit");
    cmd.current_dir(fixture.path())
        .env("PATH", format!("{}:/usr/bin:/bin", fixture.path().join("bin").display()))
        .args(["cves", "-f", "json"])
        .assert()
        .code(1);
}
