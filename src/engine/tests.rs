//! Tests for engine module

use super::*;
use crate::config::TapConfig;
use crate::http::{HttpClient, HttpClientConfig};
use crate::state::State;
use crate::streams::CountriesStream;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_message_record() {
    let msg = Message::record("countries", json!({"cca3": "NLD"}));
    assert!(msg.is_record());
    assert!(!msg.is_state());
    assert!(!msg.is_log());
}

#[test]
fn test_message_schema() {
    let msg = Message::schema("countries", json!({"type": "object"}), vec!["cca3".into()]);
    assert!(msg.is_schema());
    assert!(!msg.is_record());
}

#[test]
fn test_message_state() {
    let msg = Message::state(json!({"streams": {}}));
    assert!(msg.is_state());
    assert!(!msg.is_record());
}

#[test]
fn test_message_log() {
    assert!(Message::info("test message").is_log());
    assert!(Message::debug("debug").is_log());
    assert!(Message::warn("warning").is_log());
    assert!(Message::error("error").is_log());
}

// ============================================================================
// SyncConfig Tests
// ============================================================================

#[test]
fn test_sync_config_builder() {
    let config = SyncConfig::new().with_max_records(10);
    assert_eq!(config.max_records, 10);
    assert_eq!(SyncConfig::default().max_records, 0);
}

// ============================================================================
// Sync Tests
// ============================================================================

fn engine_for(server: &MockServer) -> SyncEngine {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    SyncEngine::new(HttpClient::with_config(config), State::new())
}

#[tokio::test]
async fn test_sync_stream_emits_schema_records_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"cca3": "NLD", "name": {"common": "Netherlands"}},
            {"cca3": "BEL", "name": {"common": "Belgium"}}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let messages = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::new())
        .await
        .unwrap();

    let schema_count = messages.iter().filter(|m| m.is_schema()).count();
    let record_count = messages.iter().filter(|m| m.is_record()).count();
    let state_count = messages.iter().filter(|m| m.is_state()).count();

    assert_eq!(schema_count, 1);
    assert_eq!(record_count, 2);
    assert_eq!(state_count, 1);

    // Schema precedes records, state follows them
    let schema_pos = messages.iter().position(Message::is_schema).unwrap();
    let first_record = messages.iter().position(Message::is_record).unwrap();
    let state_pos = messages.iter().position(Message::is_state).unwrap();
    assert!(schema_pos < first_record);
    assert!(first_record < state_pos);

    assert_eq!(engine.stats().records_synced, 2);
    assert_eq!(engine.stats().pages_fetched, 1);
    assert!(engine.state().is_completed("countries"));
}

#[tokio::test]
async fn test_sync_stream_sends_fields_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param("fields", "name,capital"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": {"common": "Netherlands"}, "capital": ["Amsterdam"]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let messages = engine
        .sync_stream(
            &CountriesStream::new(),
            &TapConfig::with_fields(["name", "capital"]),
        )
        .await
        .unwrap();

    assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 1);
}

#[tokio::test]
async fn test_sync_stream_fails_fast_on_too_many_fields() {
    let mock_server = MockServer::start().await;

    // No request may reach the server
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fields: Vec<String> = (0..11).map(|i| format!("f{i}")).collect();
    let mut engine = engine_for(&mock_server);
    let err = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::with_fields(fields))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("maximum of 10 fields"));
}

#[tokio::test]
async fn test_sync_stream_rejects_duplicate_primary_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"cca3": "NLD"},
            {"cca3": "NLD"}
        ])))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let err = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("duplicate primary key 'NLD'"));
}

#[tokio::test]
async fn test_sync_stream_rejects_missing_primary_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": {"common": "Atlantis"}}
        ])))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let err = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("primary key 'cca3' is missing"));
}

#[tokio::test]
async fn test_sync_stream_skips_pk_check_for_filtered_fields() {
    let mock_server = MockServer::start().await;

    // Field selection without cca3: records legitimately lack the key
    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param("fields", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": {"common": "Netherlands"}},
            {"name": {"common": "Belgium"}}
        ])))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let messages = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::with_fields(["name"]))
        .await
        .unwrap();

    assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 2);
}

#[tokio::test]
async fn test_sync_stream_rejects_schema_violation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"cca3": "NLD", "population": "sixteen million"}
        ])))
        .mount(&mock_server)
        .await;

    let mut engine = engine_for(&mock_server);
    let err = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("property 'population'"));
}

#[tokio::test]
async fn test_sync_stream_max_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"cca3": "NLD"},
            {"cca3": "BEL"},
            {"cca3": "LUX"}
        ])))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let mut engine = SyncEngine::new(HttpClient::with_config(config), State::new())
        .with_config(SyncConfig::new().with_max_records(2));

    let messages = engine
        .sync_stream(&CountriesStream::new(), &TapConfig::new())
        .await
        .unwrap();

    assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 2);
}
