//! Connector trait and the REST Countries tap
//!
//! Defines the core Connector trait (spec / check / discover / read) and
//! the tap implementation that wires the `countries` stream into the
//! engine.

use crate::config::{config_schema, TapConfig};
use crate::engine::{Message, SyncConfig, SyncEngine};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::state::State;
use crate::streams::{CountriesStream, RestStream, URL_BASE};
use crate::types::SyncMode;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::pin::Pin;

// ============================================================================
// Connector Spec
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Connector name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Configuration JSON schema
    pub config_schema: Value,
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Discovered catalog (available streams)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<CatalogStream>,
}

/// Stream in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema for the stream
    pub json_schema: Value,

    /// Supported sync modes
    pub supported_sync_modes: Vec<SyncMode>,

    /// Default cursor field (absent: full refresh only)
    #[serde(default)]
    pub default_cursor_field: Option<Vec<String>>,

    /// Source-defined primary key
    #[serde(default)]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Type alias for the message stream returned by read()
pub type MessageStream = Pin<Box<dyn Stream<Item = Result<Message>> + Send>>;

/// Core trait that connectors implement
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (for UI/validation)
    fn spec(&self) -> ConnectorSpec;

    /// Tests if the configuration is valid and the API is reachable
    async fn check(&self, config: &Value) -> Result<CheckResult>;

    /// Lists available streams from the source
    async fn discover(&self) -> Result<Catalog>;

    /// Reads data from all streams
    ///
    /// Returns a stream of messages (schema, records, state, logs)
    async fn read(&self, config: &Value) -> Result<MessageStream>;
}

// ============================================================================
// REST Countries Tap
// ============================================================================

/// The REST Countries tap
#[derive(Debug, Clone, Default)]
pub struct TapRestCountries {
    sync_config: SyncConfig,
}

impl TapRestCountries {
    /// Create the tap
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_sync_config(mut self, sync_config: SyncConfig) -> Self {
        self.sync_config = sync_config;
        self
    }

    /// The streams exposed by this tap
    pub fn streams(&self) -> Vec<Box<dyn RestStream>> {
        vec![Box::new(CountriesStream::new())]
    }

    fn http_client(&self, tap_config: &TapConfig) -> HttpClient {
        let base_url = tap_config.api_url.as_deref().unwrap_or(URL_BASE);
        let config = HttpClientConfig::builder().base_url(base_url).build();
        HttpClient::with_config(config)
    }
}

#[async_trait]
impl Connector for TapRestCountries {
    fn spec(&self) -> ConnectorSpec {
        ConnectorSpec {
            name: "tap-restcountries".to_string(),
            title: "REST Countries".to_string(),
            description: Some(
                "Extracts country reference data from the REST Countries v3.1 API".to_string(),
            ),
            config_schema: config_schema().to_json(),
        }
    }

    async fn check(&self, config: &Value) -> Result<CheckResult> {
        // Config violations are fatal, reachability problems are reported
        let tap_config = TapConfig::from_value(config.clone())?;

        let client = self.http_client(&tap_config);
        let stream = CountriesStream::new();

        // Minimal probe: a single field keeps the response small
        let probe = crate::http::RequestConfig::new().query("fields", "cca3");
        match client.get_with_config(stream.path(), probe).await {
            Ok(_) => Ok(CheckResult::success()),
            Err(e) => Ok(CheckResult::failure(format!("Connection failed: {e}"))),
        }
    }

    async fn discover(&self) -> Result<Catalog> {
        let streams = self
            .streams()
            .iter()
            .map(|stream| CatalogStream {
                name: stream.name().to_string(),
                json_schema: stream.schema().to_json(),
                supported_sync_modes: stream.supported_sync_modes(),
                default_cursor_field: stream.replication_key().map(|k| vec![k.to_string()]),
                source_defined_primary_key: Some(
                    stream
                        .primary_key()
                        .iter()
                        .map(|k| vec![(*k).to_string()])
                        .collect(),
                ),
            })
            .collect();

        Ok(Catalog { streams })
    }

    async fn read(&self, config: &Value) -> Result<MessageStream> {
        let tap_config = TapConfig::from_value(config.clone())?;

        let mut engine = SyncEngine::new(self.http_client(&tap_config), State::new())
            .with_config(self.sync_config.clone());

        let mut messages = Vec::new();
        for stream in self.streams() {
            messages.extend(engine.sync_stream(stream.as_ref(), &tap_config).await?);
        }

        Ok(Box::pin(futures::stream::iter(messages.into_iter().map(Ok))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_spec() {
        let spec = TapRestCountries::new().spec();
        assert_eq!(spec.name, "tap-restcountries");
        assert_eq!(spec.config_schema["properties"]["fields"]["type"], "array");
    }

    #[test]
    fn test_check_result() {
        let result = CheckResult::success();
        assert!(result.success);
        assert!(result.message.is_none());

        let result = CheckResult::failure("Connection failed");
        assert!(!result.success);
        assert_eq!(result.message, Some("Connection failed".to_string()));
    }

    #[tokio::test]
    async fn test_discover_single_stream() {
        let tap = TapRestCountries::new();
        let catalog = tap.discover().await.unwrap();

        assert_eq!(catalog.streams.len(), 1);

        let countries = &catalog.streams[0];
        assert_eq!(countries.name, "countries");
        assert_eq!(countries.supported_sync_modes, vec![SyncMode::FullRefresh]);
        assert!(countries.default_cursor_field.is_none());
        assert_eq!(
            countries.source_defined_primary_key,
            Some(vec![vec!["cca3".to_string()]])
        );
        assert_eq!(countries.json_schema["properties"]["cca3"]["type"], "string");
    }

    #[tokio::test]
    async fn test_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all"))
            .and(query_param("fields", "cca3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "cca3": "NLD" }])),
            )
            .mount(&mock_server)
            .await;

        let tap = TapRestCountries::new();
        let result = tap
            .check(&json!({ "api_url": mock_server.uri() }))
            .await
            .unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_check_reports_unreachable_api() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let tap = TapRestCountries::new();
        let result = tap
            .check(&json!({ "api_url": mock_server.uri() }))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.message.unwrap().contains("Connection failed"));
    }

    #[tokio::test]
    async fn test_check_rejects_invalid_config() {
        let fields: Vec<String> = (0..11).map(|i| format!("f{i}")).collect();
        let tap = TapRestCountries::new();
        assert!(tap.check(&json!({ "fields": fields })).await.is_err());
    }

    #[tokio::test]
    async fn test_read_emits_messages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "cca3": "NLD" },
                { "cca3": "BEL" }
            ])))
            .mount(&mock_server)
            .await;

        let tap = TapRestCountries::new();
        let stream = tap
            .read(&json!({ "api_url": mock_server.uri() }))
            .await
            .unwrap();
        let messages: Vec<Message> = stream.map(|m| m.unwrap()).collect().await;

        assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 2);
        assert_eq!(messages.iter().filter(|m| m.is_schema()).count(), 1);
        assert_eq!(messages.iter().filter(|m| m.is_state()).count(), 1);
    }
}
