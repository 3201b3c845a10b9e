/// Integration tests for the inventory and application layers
mod test_utilities;

use juju_cve_audit::prelude::*;
use std::rc::Rc;
use test_utilities::mocks::*;

const LIST_MODELS_PROD: &str = "juju list-models --format=json --controller=prod";
const LIST_MODELS_STAGE: &str = "juju list-models --format=json --controller=stage";
const LIST_MACHINES_OPENSTACK: &str = "juju list-machines --format=json --model=prod:admin/openstack";
const LIST_MACHINES_CONTROLLER: &str = "juju list-machines --format=json --model=prod:admin/controller";

const FOCAL_MANIFEST: &str = "bash\t5.0-6ubuntu1.1\nlibssl1.1\t1.1.1f-1ubuntu2.16\nupdate-manager-core\t1:20.04.10\n";

const FOCAL_DATABASE: &str = r#"{
    "CVE-2023-0286": {"priority": "high", "releases": {"focal": {"openssl": {
        "status": ["released", "1.1.1f-1ubuntu2.17"],
        "binaries": {"libssl1.1": "1.1.1f-1ubuntu2.17"}}}}},
    "CVE-2022-3715": {"priority": "low", "releases": {"focal": {"bash": {
        "status": ["needed"],
        "binaries": {"bash": ""}}}}},
    "CVE-2021-9999": {"priority": "critical", "releases": {"focal": {"bash": {
        "status": ["released", "5.0-6ubuntu1"],
        "binaries": {"bash": "5.0-6ubuntu1"}}}}}
}"#;

fn on_machine(model: &str, id: &str, command: &str) -> String {
    format!("juju ssh --model={} {} -- {}", model, id, command)
}

fn scripted_cloud() -> MockRemoteSession {
    MockRemoteSession::new()
        .respond(
            "juju list-controllers --format=json",
            r#"{"controllers": {"prod": {"uuid": "1"}, "stage": {"uuid": "2"}}}"#,
        )
        .respond(
            LIST_MODELS_PROD,
            r#"{"models": [
                {"name": "admin/controller", "short-name": "controller"},
                {"name": "admin/openstack", "short-name": "openstack"}
            ]}"#,
        )
        .respond(
            LIST_MODELS_STAGE,
            r#"{"models": [{"name": "admin/k8s", "short-name": "k8s"}]}"#,
        )
        .respond(LIST_MACHINES_CONTROLLER, r#"{"machines": {"0": {}}}"#)
        .respond(LIST_MACHINES_OPENSTACK, r#"{"machines": {"0": {}, "1": {}}}"#)
        .respond(on_machine("prod:admin/openstack", "0", "hostname"), "compute-0\n")
        .respond(on_machine("prod:admin/openstack", "0", "dpkg-query -W"), FOCAL_MANIFEST)
        .respond(on_machine("prod:admin/openstack", "1", "hostname"), "compute-1\n")
}

#[test]
fn test_list_inventory_in_traversal_order() {
    let cloud = Cloud::new(Rc::new(scripted_cloud()));

    assert_eq!(
        ListInventoryUseCase::controllers(&cloud).unwrap(),
        vec!["prod", "stage"]
    );
    assert_eq!(
        ListInventoryUseCase::models(&cloud).unwrap(),
        vec!["prod:admin/controller", "prod:admin/openstack", "stage:admin/k8s"]
    );
}

#[test]
fn test_listings_are_cached_per_cloud() {
    let session = Rc::new(scripted_cloud());
    let cloud = Cloud::new(session.clone());

    ListInventoryUseCase::models(&cloud).unwrap();
    ListInventoryUseCase::models(&cloud).unwrap();

    assert_eq!(session.count("juju list-controllers --format=json"), 1);
    assert_eq!(session.count(LIST_MODELS_PROD), 1);
    assert_eq!(session.count(LIST_MODELS_STAGE), 1);
}

#[test]
fn test_selection_skips_unselected_controllers() {
    let session = Rc::new(scripted_cloud());
    let cloud = Cloud::new(session.clone());
    let selection = Selection::all()
        .include_controllers(["prod"])
        .exclude_models(["controller"]);

    let models: Vec<String> = cloud
        .filter(&selection)
        .map(|model| model.unwrap().display_name())
        .collect();

    // include-controllers takes precedence over model exclusions
    assert_eq!(models, vec!["prod:admin/controller", "prod:admin/openstack"]);
    assert_eq!(session.count(LIST_MODELS_STAGE), 0);
}

#[test]
fn test_selection_by_short_model_name() {
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let selection = Selection::all().include_models(["openstack", "k8s"]);

    let models: Vec<String> = cloud
        .filter(&selection)
        .map(|model| model.unwrap().display_name())
        .collect();

    assert_eq!(models, vec!["prod:admin/openstack", "stage:admin/k8s"]);
}

#[test]
fn test_find_model_and_machine() {
    let cloud = Cloud::new(Rc::new(scripted_cloud()));

    let model = cloud.find("prod", "openstack").unwrap().unwrap();
    assert_eq!(model.display_name(), "prod:admin/openstack");
    let machine = model.find("1").unwrap().unwrap();
    assert_eq!(machine.hostname().unwrap(), "compute-1");
    assert_eq!(machine.slug(), "prod-admin-openstack-1");

    assert!(cloud.find("prod", "missing").unwrap().is_none());
    assert!(cloud.find("nope", "openstack").unwrap().is_none());
}

#[test]
fn test_collect_manifest_for_machine() {
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let use_case = CollectManifestsUseCase::new(MockProgressReporter::new());

    let manifest = use_case.for_machine(&cloud, "prod", "admin/openstack", "0").unwrap();
    assert_eq!(manifest.hostname, "compute-0");
    assert_eq!(manifest.slug, "prod-admin-openstack-0");
    assert_eq!(manifest.manifest, FOCAL_MANIFEST);

    let err = use_case.for_machine(&cloud, "prod", "admin/openstack", "7").unwrap_err();
    assert!(err.to_string().contains("Could not find the specified machine"));
}

#[test]
fn test_audit_isolates_machine_failures() {
    let provider = MockReferenceDataProvider::new().with_database("focal", FOCAL_DATABASE);
    let progress = MockProgressReporter::new();
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let use_case = AuditCvesUseCase::new(&provider, UctScanner::new(), progress.clone());

    let request = AuditRequest::new(
        AuditTarget::Selection(Selection::all().include_models(["openstack"])),
        false,
    );
    let response = use_case.execute(&cloud, &request).unwrap();

    assert_eq!(response.reports.len(), 1);
    let report = &response.reports[0];
    assert_eq!(report.hostname, "compute-0");
    let ids: Vec<&str> = report.results.iter().map(|r| r.cve_id()).collect();
    assert_eq!(ids, vec!["CVE-2023-0286", "CVE-2022-3715"]);
    assert_eq!(report.results[0].fixed_version(), Some("1.1.1f-1ubuntu2.17"));
    assert_eq!(report.results[0].repository(), "Ubuntu Archive");
    assert_eq!(report.results[1].fixed_version(), None);

    // machine 1 has no scripted manifest
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].machine, "-m prod:admin/openstack 1");
    assert_eq!(progress.errors().len(), 1);
    assert_eq!(provider.fetches(), vec!["focal"]);
}

#[test]
fn test_audit_fixable_only_and_threshold() {
    let provider = MockReferenceDataProvider::new().with_database("focal", FOCAL_DATABASE);
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let use_case = AuditCvesUseCase::new(&provider, UctScanner::new(), MockProgressReporter::new());

    let request = AuditRequest::new(
        AuditTarget::Machine {
            controller: "prod".to_string(),
            model: "openstack".to_string(),
            machine_id: "0".to_string(),
        },
        true,
    );
    let response = use_case.execute(&cloud, &request).unwrap();

    assert!(response.failures.is_empty());
    assert_eq!(response.result_count(), 1);
    assert!(response.has_result_at_or_above(Priority::High));
    assert!(!response.has_result_at_or_above(Priority::Critical));
}

#[test]
fn test_missing_reference_data_is_a_machine_failure() {
    let provider = MockReferenceDataProvider::new();
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let use_case = AuditCvesUseCase::new(&provider, UctScanner::new(), MockProgressReporter::new());

    let request = AuditRequest::new(
        AuditTarget::Selection(Selection::all().include_models(["openstack"])),
        false,
    );
    let response = use_case.execute(&cloud, &request).unwrap();

    assert!(response.reports.is_empty());
    assert_eq!(response.failures.len(), 2);
    assert!(response.failures[0].message.contains("no reference data for series focal"));
}

#[test]
fn test_listing_failure_ends_audit() {
    let session = MockRemoteSession::new().fail(
        "juju list-controllers --format=json",
        1,
        "ERROR no controllers registered",
    );
    let cloud = Cloud::new(Rc::new(session));
    let provider = MockReferenceDataProvider::new();
    let use_case = AuditCvesUseCase::new(&provider, UctScanner::new(), MockProgressReporter::new());

    let request = AuditRequest::new(AuditTarget::Selection(Selection::all()), false);
    let err = use_case.execute(&cloud, &request).unwrap_err();
    assert!(format!("{:#}", err).contains("no controllers registered"));
}

#[test]
fn test_reports_serialize_as_csv_and_json() {
    let provider = MockReferenceDataProvider::new().with_database("focal", FOCAL_DATABASE);
    let cloud = Cloud::new(Rc::new(scripted_cloud()));
    let use_case = AuditCvesUseCase::new(&provider, UctScanner::new(), MockProgressReporter::new());
    let request = AuditRequest::new(
        AuditTarget::Machine {
            controller: "prod".to_string(),
            model: "admin/openstack".to_string(),
            machine_id: "0".to_string(),
        },
        false,
    );
    let response = use_case.execute(&cloud, &request).unwrap();

    let csv = CsvFormatter::new().format(&response.reports).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Model,Machine ID,Hostname,CVE,Priority,Package Name,Fixed Version,Repository"
    );
    assert_eq!(
        lines[1],
        "prod:admin/openstack,0,compute-0,CVE-2023-0286,high,libssl1.1,1.1.1f-1ubuntu2.17,Ubuntu Archive"
    );
    assert_eq!(
        lines[2],
        "prod:admin/openstack,0,compute-0,CVE-2022-3715,low,bash,,Ubuntu Archive"
    );

    let json = JsonFormatter::new().format(&response.reports).unwrap();
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
    let results: Vec<ScanResult> =
        serde_json::from_value(document["prod-admin-openstack-0"].clone()).unwrap();
    assert_eq!(results, response.reports[0].results);
}
