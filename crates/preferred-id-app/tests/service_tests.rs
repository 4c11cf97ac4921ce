// Rust guideline compliant 2026-10-12

//! Integration tests for the `$preferred-id` orchestrator.

use preferred_id_app::{
    ArgumentSource, ArgumentStatus, IdentificationService, InMemorySearchProvider, Interaction,
    Method, OperationRequest, OperationResponse, StorageSearchProvider,
};
use preferred_id_core::{
    IdentifierEntry, IdentifierKind, InformationModel, IssueSeverity, NamingSystem, Payload,
    ResolutionOutcome, ResourceRecord, ResourceStore, StatusCode,
};
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::Level;

/// The sample resource: one OID entry and one URI entry.
fn sample_naming_system() -> ResourceRecord {
    NamingSystem::new(
        "sample",
        vec![
            IdentifierEntry::new(IdentifierKind::Oid, "1.234.5678.90"),
            IdentifierEntry::new(IdentifierKind::Uri, "http://test.uri.com"),
        ],
    )
    .to_record()
    .expect("Failed to build record")
}

fn service_with(records: Vec<ResourceRecord>) -> (IdentificationService, Arc<InMemorySearchProvider>) {
    let provider = Arc::new(InMemorySearchProvider::new(records));
    (IdentificationService::new(provider.clone()), provider)
}

fn request() -> OperationRequest {
    OperationRequest::new("preferred-id", Method::Get)
}

/// Log sink capturing JSON-formatted events for the current thread.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    /// Levels of captured events above DEBUG, in emission order.
    fn levels(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .map(|event| event["level"].as_str().unwrap().to_string())
            .filter(|level| level != "DEBUG" && level != "TRACE")
            .collect()
    }
}

fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

fn assert_single_informational_issue(response: &OperationResponse) {
    let payload = response.payload().expect("payload written");
    assert_eq!(payload.resource_type(), "OperationOutcome");
    assert_eq!(payload.issues().len(), 1);
    assert_eq!(payload.issues()[0].severity, IssueSeverity::Information);
}

#[tokio::test]
async fn test_oid_request_returns_oid_value() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90")
        .with_query("type", "oid");
    let mut response = OperationResponse::new();

    let outcome = service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert!(matches!(outcome, ResolutionOutcome::Found(_)));
    assert_eq!(response.status(), Some(StatusCode::Ok));
    assert_eq!(response.information_model(), Some(InformationModel::FhirR4));
    match response.payload() {
        Some(Payload::Parameters(parameters)) => {
            assert_eq!(parameters.parameter.len(), 1);
            assert_eq!(parameters.parameter[0].name, "oid");
            assert_eq!(parameters.parameter[0].value_string, "1.234.5678.90");
        }
        other => panic!("Expected Parameters, got {:?}", other),
    }
    assert_eq!(provider.call_count(), 1);
    assert!(ctx.all_handled());
}

#[tokio::test]
async fn test_known_oid_resolves_uri_by_default() {
    let (service, _provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    let body: serde_json::Value =
        serde_json::from_str(&response.body(false).unwrap().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "resourceType": "Parameters",
            "parameter": [{ "name": "uri", "valueString": "http://test.uri.com" }]
        })
    );
}

#[tokio::test]
async fn test_missing_id_is_bad_request_without_search() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request().with_resource_type("NamingSystem");
    let mut response = OperationResponse::new();

    let outcome = service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(outcome.status(), StatusCode::BadRequest);
    assert_eq!(response.status(), Some(StatusCode::BadRequest));
    assert_single_informational_issue(&response);
    assert_eq!(
        response.payload().unwrap().issues()[0].message(),
        Some("No id provided to the $preferred-id operation.")
    );
    assert_eq!(provider.call_count(), 0);
    assert!(!ctx.all_handled());
}

#[tokio::test]
async fn test_wrong_resource_type_is_bad_request_without_search() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("CodingSystem")
        .with_query("id", "1.234.5678.90")
        .with_query("type", "url");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::BadRequest));
    assert_single_informational_issue(&response);
    assert_eq!(
        response.payload().unwrap().issues()[0].message(),
        Some("Operation called with wrong resource. Expected [NamingSystem] and got [CodingSystem] instead.")
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1234")
        .with_query("type", "url");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::NotFound));
    assert_single_informational_issue(&response);
    assert_eq!(
        response.payload().unwrap().issues()[0].message(),
        Some("$preferred-id operation found no NamingSystem resources with Identifier=[1234] and TargetType=[uri]")
    );
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_missing_kind_is_not_found() {
    let (service, _provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90")
        .with_query("type", "uuid");
    let mut response = OperationResponse::new();

    let outcome = service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::NotFound {
            known_id: "1.234.5678.90".to_string(),
            kind: IdentifierKind::Uuid,
        }
    );
    assert_single_informational_issue(&response);
}

#[tokio::test]
async fn test_two_matches_are_ambiguous() {
    let other = NamingSystem::new(
        "copy",
        vec![
            IdentifierEntry::new(IdentifierKind::Oid, "1.234.5678.90"),
            IdentifierEntry::new(IdentifierKind::Uri, "http://copy.uri.com"),
        ],
    )
    .to_record()
    .unwrap();
    let (service, _provider) = service_with(vec![sample_naming_system(), other]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::InternalServerError));
    assert_single_informational_issue(&response);
    let message = response.payload().unwrap().issues()[0].message().unwrap();
    assert!(message.contains("found 2 NamingSystem resources"));
    assert!(message.contains("[sample, copy]"));
}

#[tokio::test]
async fn test_query_shape() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90")
        .with_server_base("https://fhir.example.org/");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    let query = provider.last_query().expect("search was run");
    assert_eq!(query.arguments.len(), 1);
    assert_eq!(query.arguments[0].name, "_type");
    assert_eq!(query.arguments[0].value, "NamingSystem");
    assert_eq!(query.arguments[0].source, ArgumentSource::Path);
    assert_eq!(query.arguments[0].status, ArgumentStatus::Handled);
    assert_eq!(query.options.server_base, "https://fhir.example.org/");
    assert_eq!(query.options.interaction, Interaction::TypeCustom);
    assert_eq!(query.options.information_model, InformationModel::FhirR4);
    assert!(query.options.latest_only);
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let provider = Arc::new(InMemorySearchProvider::failing("repository offline"));
    let service = IdentificationService::new(provider);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let mut response = OperationResponse::new();

    let result = service.preferred_id_get(&mut ctx, &mut response).await;

    assert!(result.is_err());
    assert_eq!(response.status(), None);
}

#[tokio::test]
async fn test_undecodable_record_propagates() {
    let broken = ResourceRecord::new(json!({
        "resourceType": "NamingSystem",
        "id": "broken",
        "uniqueId": "not-a-list"
    }))
    .unwrap();
    let (service, _provider) = service_with(vec![broken]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let mut response = OperationResponse::new();

    assert!(service.preferred_id_get(&mut ctx, &mut response).await.is_err());
}

#[tokio::test]
async fn test_handle_skips_other_operations() {
    let (service, provider) = service_with(vec![sample_naming_system()]);
    let mut response = OperationResponse::new();

    let mut other = OperationRequest::new("test", Method::Get).with_resource_type("NamingSystem");
    assert!(service.handle(&mut other, &mut response).await.is_none());

    let mut post = OperationRequest::new("preferred-id", Method::Post)
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    assert!(service.handle(&mut post, &mut response).await.is_none());

    let mut r3 = request()
        .with_information_model(InformationModel::FhirR3)
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    assert!(service.handle(&mut r3, &mut response).await.is_none());

    assert_eq!(provider.call_count(), 0);
    assert_eq!(response.status(), None);

    let mut matching = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let outcome = service.handle(&mut matching, &mut response).await;
    assert!(matches!(outcome, Some(Ok(ResolutionOutcome::Found(_)))));
}

#[tokio::test]
async fn test_storage_provider_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let store = ResourceStore::new(temp_dir.path().join("resources.jsonl")).unwrap();
    store
        .save_all(&[
            sample_naming_system(),
            ResourceRecord::new(json!({ "resourceType": "CodeSystem", "id": "cs" })).unwrap(),
        ])
        .unwrap();

    let service = IdentificationService::new(Arc::new(StorageSearchProvider::new(store)));
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "http://test.uri.com")
        .with_query("type", "oid");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::Ok));
    let body = response.body(true).unwrap().unwrap();
    assert!(body.contains("\"valueString\": \"1.234.5678.90\""));
}

#[tokio::test]
async fn test_known_id_matches_untyped_identifier() {
    let record = ResourceRecord::new(json!({
        "resourceType": "NamingSystem",
        "id": "local",
        "uniqueId": [
            { "type": "other", "value": "LOCAL-42" },
            { "type": "uri", "value": "http://test.uri.com" }
        ]
    }))
    .unwrap();
    let (service, _provider) = service_with(vec![record]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "LOCAL-42")
        .with_query("type", "uri");
    let mut response = OperationResponse::new();

    let outcome = service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::Ok));
    match outcome {
        ResolutionOutcome::Found(entry) => {
            assert_eq!(entry.kind, IdentifierKind::Uri);
            assert_eq!(entry.value, "http://test.uri.com");
        }
        other => panic!("Expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_untyped_identifier_is_never_returned() {
    let record = ResourceRecord::new(json!({
        "resourceType": "NamingSystem",
        "id": "local",
        "uniqueId": [
            { "type": "other", "value": "LOCAL-42" },
            { "type": "uri", "value": "http://test.uri.com" }
        ]
    }))
    .unwrap();
    let (service, _provider) = service_with(vec![record]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "http://test.uri.com")
        .with_query("type", "oid");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::NotFound));
}

#[tokio::test]
async fn test_null_unique_id_does_not_break_resolution() {
    let empty = ResourceRecord::new(json!({
        "resourceType": "NamingSystem",
        "id": "empty",
        "uniqueId": null
    }))
    .unwrap();
    let (service, _provider) = service_with(vec![empty, sample_naming_system()]);
    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    let mut response = OperationResponse::new();

    service.preferred_id_get(&mut ctx, &mut response).await.unwrap();

    assert_eq!(response.status(), Some(StatusCode::Ok));
}

#[tokio::test]
async fn test_client_errors_log_at_warn() {
    let (service, _provider) = service_with(vec![sample_naming_system()]);
    let (logs, _guard) = capture_logs();

    let mut missing_id = request().with_resource_type("NamingSystem");
    service
        .preferred_id_get(&mut missing_id, &mut OperationResponse::new())
        .await
        .unwrap();
    assert_eq!(logs.levels(), vec!["WARN".to_string()]);

    let mut wrong_type = request()
        .with_resource_type("CodingSystem")
        .with_query("id", "1.234.5678.90");
    service
        .preferred_id_get(&mut wrong_type, &mut OperationResponse::new())
        .await
        .unwrap();
    assert_eq!(logs.levels(), vec!["WARN".to_string(), "WARN".to_string()]);
}

#[tokio::test]
async fn test_not_found_logs_at_info() {
    let (service, _provider) = service_with(vec![sample_naming_system()]);
    let (logs, _guard) = capture_logs();

    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1234")
        .with_query("type", "url");
    service
        .preferred_id_get(&mut ctx, &mut OperationResponse::new())
        .await
        .unwrap();

    let levels = logs.levels();
    assert!(!levels.is_empty());
    assert!(levels.iter().all(|level| level == "INFO"));
}

#[tokio::test]
async fn test_ambiguity_logs_at_error() {
    let copy = NamingSystem::new(
        "copy",
        vec![
            IdentifierEntry::new(IdentifierKind::Oid, "1.234.5678.90"),
            IdentifierEntry::new(IdentifierKind::Uri, "http://copy.uri.com"),
        ],
    )
    .to_record()
    .unwrap();
    let (service, _provider) = service_with(vec![sample_naming_system(), copy]);
    let (logs, _guard) = capture_logs();

    let mut ctx = request()
        .with_resource_type("NamingSystem")
        .with_query("id", "1.234.5678.90");
    service
        .preferred_id_get(&mut ctx, &mut OperationResponse::new())
        .await
        .unwrap();

    let levels = logs.levels();
    assert_eq!(levels.last().map(String::as_str), Some("ERROR"));
    assert!(!levels.iter().any(|level| level == "WARN"));
}
