// Rust guideline compliant 2026-10-12

//! Integration tests for CLI commands.

use preferred_id_cli::commands::resolve::{self, ResolveArgs};
use preferred_id_cli::commands::{import, init, list, mcp, remove, show};
use preferred_id_cli::create_formatter;
use preferred_id_core::{Config, InformationModel, OutputFormat, Payload, ResourceStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = r#"{
  "resourceType": "NamingSystem",
  "id": "sample",
  "name": "Sample",
  "status": "active",
  "uniqueId": [
    { "type": "oid", "value": "1.234.5678.90" },
    { "type": "uri", "value": "http://test.uri.com", "preferred": true }
  ]
}"#;

fn initialized_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    init::execute(Some(temp_dir.path())).expect("Failed to init repository");
    temp_dir
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write import file");
    path
}

fn repo_with_sample() -> TempDir {
    let temp_dir = initialized_repo();
    let file = write_file(temp_dir.path(), "sample.json", SAMPLE);
    import::execute(Some(temp_dir.path()), &file).expect("Failed to import sample");
    temp_dir
}

fn resolve_args(id: &str, kind: Option<&str>) -> ResolveArgs {
    ResolveArgs {
        id: Some(id.to_string()),
        kind: kind.map(str::to_string),
        resource_type: "NamingSystem".to_string(),
    }
}

#[test]
fn test_init_creates_correct_structure() {
    let temp_dir = initialized_repo();
    let data_dir = temp_dir.path().join(".preferred-id");

    assert!(data_dir.join("resources.jsonl").exists());
    assert!(data_dir.join("config.toml").exists());
    let config = fs::read_to_string(data_dir.join("config.toml")).unwrap();
    assert!(config.contains("server_base"));
}

#[test]
fn test_init_keeps_existing_resources() {
    let temp_dir = repo_with_sample();
    init::execute(Some(temp_dir.path())).unwrap();

    let store =
        ResourceStore::new(temp_dir.path().join(".preferred-id/resources.jsonl")).unwrap();
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn test_import_requires_initialized_repo() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "sample.json", SAMPLE);

    let err = import::execute(Some(temp_dir.path()), &file).unwrap_err();
    assert!(err.to_string().contains("pid init"));
}

#[test]
fn test_import_array_upserts_by_id() {
    let temp_dir = initialized_repo();
    let first = write_file(
        temp_dir.path(),
        "first.json",
        &format!(
            "[{}, {{\"resourceType\": \"CodeSystem\", \"id\": \"cs\"}}, {{\"id\": \"untyped\"}}]",
            SAMPLE
        ),
    );

    let summary = import::execute(Some(temp_dir.path()), &first).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);

    let renamed = SAMPLE.replace("\"Sample\"", "\"Renamed\"");
    let second = write_file(temp_dir.path(), "second.json", &renamed);
    import::execute(Some(temp_dir.path()), &second).unwrap();

    let naming_systems = list::load_naming_systems(Some(temp_dir.path())).unwrap();
    assert_eq!(naming_systems.len(), 1);
    assert_eq!(naming_systems[0].name.as_deref(), Some("Renamed"));
}

#[test]
fn test_import_without_valid_resources_fails() {
    let temp_dir = initialized_repo();
    let file = write_file(temp_dir.path(), "bad.jsonl", "not json\n{\"id\": \"x\"}\n");

    assert!(import::execute(Some(temp_dir.path()), &file).is_err());
}

#[test]
fn test_list_returns_naming_systems_only() {
    let temp_dir = initialized_repo();
    let file = write_file(
        temp_dir.path(),
        "mixed.jsonl",
        &format!(
            "{}\n{{\"resourceType\": \"CodeSystem\", \"id\": \"cs\"}}\n",
            SAMPLE.replace('\n', "")
        ),
    );
    import::execute(Some(temp_dir.path()), &file).unwrap();

    let formatter = create_formatter(OutputFormat::Plain, false, false);
    let count = list::execute(Some(temp_dir.path()), formatter.as_ref()).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_resolve_oid_from_uri() {
    let temp_dir = repo_with_sample();

    let result = resolve::run(
        Some(temp_dir.path()),
        resolve_args("http://test.uri.com", Some("oid")),
    )
    .unwrap();

    assert_eq!(result.status_code, 200);
    match result.payload {
        Payload::Parameters(parameters) => {
            assert_eq!(parameters.parameter[0].name, "oid");
            assert_eq!(parameters.parameter[0].value_string, "1.234.5678.90");
        }
        other => panic!("Expected Parameters, got {:?}", other),
    }
}

#[test]
fn test_resolve_diagnostics_map_to_exit_codes() {
    let temp_dir = repo_with_sample();
    let formatter = create_formatter(OutputFormat::Json, false, false);

    let not_found = resolve::execute(
        Some(temp_dir.path()),
        resolve_args("1234", Some("url")),
        formatter.as_ref(),
    )
    .unwrap();
    assert_eq!(not_found, 404);
    assert_eq!(resolve::exit_code(not_found), 2);

    let wrong_type = resolve::run(
        Some(temp_dir.path()),
        ResolveArgs {
            resource_type: "CodingSystem".to_string(),
            ..resolve_args("1.234.5678.90", None)
        },
    )
    .unwrap();
    assert_eq!(wrong_type.status_code, 400);

    let missing_id = resolve::run(
        Some(temp_dir.path()),
        ResolveArgs {
            id: None,
            ..resolve_args("", None)
        },
    )
    .unwrap();
    assert_eq!(missing_id.status_code, 400);
    assert_eq!(missing_id.payload.issues().len(), 1);
}

#[test]
fn test_resolve_rejects_unserved_information_model() {
    let temp_dir = repo_with_sample();
    let data_dir = temp_dir.path().join(".preferred-id");
    let config = Config {
        information_model: InformationModel::FhirR3,
        ..Config::default()
    };
    config.save(&data_dir).unwrap();

    let err = resolve::run(Some(temp_dir.path()), resolve_args("1.234.5678.90", None))
        .unwrap_err();
    assert!(err.to_string().contains("not served"));
}

#[test]
fn test_show_prints_stored_resource() {
    let temp_dir = repo_with_sample();

    let value = show::load(Some(temp_dir.path()), "NamingSystem", "sample").unwrap();
    assert_eq!(value["name"], "Sample");
    assert_eq!(value["uniqueId"][0]["value"], "1.234.5678.90");

    let err = show::load(Some(temp_dir.path()), "NamingSystem", "missing").unwrap_err();
    assert!(err.to_string().contains("NamingSystem/missing"));
}

#[test]
fn test_remove_deletes_resource() {
    let temp_dir = repo_with_sample();

    remove::execute(Some(temp_dir.path()), "NamingSystem", "sample").unwrap();
    assert!(list::load_naming_systems(Some(temp_dir.path())).unwrap().is_empty());

    let result = resolve::run(Some(temp_dir.path()), resolve_args("1.234.5678.90", None)).unwrap();
    assert_eq!(result.status_code, 404);

    assert!(remove::execute(Some(temp_dir.path()), "NamingSystem", "sample").is_err());
}

#[test]
fn test_mcp_log_level_falls_back_to_config() {
    let temp_dir = initialized_repo();
    let config = Config {
        log_level: "debug".to_string(),
        ..Config::default()
    };
    config.save(&temp_dir.path().join(".preferred-id")).unwrap();

    assert_eq!(mcp::effective_log_level(Some(temp_dir.path()), None), "debug");
    assert_eq!(
        mcp::effective_log_level(Some(temp_dir.path()), Some("warn".to_string())),
        "warn"
    );

    let uninitialized = TempDir::new().unwrap();
    assert_eq!(
        mcp::effective_log_level(Some(uninitialized.path()), None),
        Config::default().log_level
    );
}
