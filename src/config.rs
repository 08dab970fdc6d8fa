//! Tap configuration
//!
//! The tap accepts two optional settings: `fields`, a list of country
//! attributes to request from the API, and `api_url`, an override for the
//! API URL root. The REST Countries API caps field selection at 10 fields
//! per request, so the list is validated before any request is built.

use crate::error::{Error, Result};
use crate::schema::{JsonSchema, JsonType, SchemaProperty};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of fields the API accepts in a single `fields` selection.
pub const MAX_FIELDS: usize = 10;

/// Tap configuration parsed from the user-supplied JSON object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TapConfig {
    /// Fields to include in the API response. Absent or empty means all
    /// fields. At most [`MAX_FIELDS`] entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Override for the API URL root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl TapConfig {
    /// Create an empty configuration (all fields requested)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a field selection
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Set the API URL root override
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Parse a configuration from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let config: TapConfig = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate the configuration
    ///
    /// Fails if more than [`MAX_FIELDS`] fields are selected.
    pub fn validate(&self) -> Result<()> {
        if let Some(fields) = &self.fields {
            if fields.len() > MAX_FIELDS {
                return Err(Error::invalid_config_value(
                    "fields",
                    format!(
                        "the API has a maximum of {MAX_FIELDS} fields per request, got {}",
                        fields.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// The selected fields, or None when all fields are requested
    ///
    /// An empty list is treated the same as an absent one.
    pub fn selected_fields(&self) -> Option<&[String]> {
        match &self.fields {
            Some(fields) if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

/// The configuration JSON schema advertised by the `spec` operation
pub fn config_schema() -> JsonSchema {
    let mut schema = JsonSchema::new()
        .with_title("tap-restcountries")
        .with_description("Configuration for the REST Countries tap");
    schema.add_property(
        "fields",
        SchemaProperty::array(SchemaProperty::new(JsonType::String)).with_description(
            "List of fields to include in the API response (max 10). Omit to fetch all fields.",
        ),
    );
    schema.add_property(
        "api_url",
        SchemaProperty::new(JsonType::String)
            .with_format("uri")
            .with_description("Override for the API URL root"),
    );
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_parse_empty_config() {
        let config = TapConfig::from_value(json!({})).unwrap();
        assert!(config.fields.is_none());
        assert!(config.selected_fields().is_none());
    }

    #[test]
    fn test_parse_fields_config() {
        let config = TapConfig::from_value(json!({ "fields": ["name", "capital"] })).unwrap();
        assert_eq!(
            config.selected_fields(),
            Some(&["name".to_string(), "capital".to_string()][..])
        );
    }

    #[test]
    fn test_empty_fields_treated_as_absent() {
        let config = TapConfig::from_value(json!({ "fields": [] })).unwrap();
        assert!(config.selected_fields().is_none());
    }

    #[test_case(0; "no fields")]
    #[test_case(1; "one field")]
    #[test_case(10; "exactly the cap")]
    fn test_validate_accepts(count: usize) {
        let fields: Vec<String> = (0..count).map(|i| format!("field{i}")).collect();
        let config = TapConfig::with_fields(fields);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_eleven_fields() {
        let fields: Vec<String> = (0..11).map(|i| format!("field{i}")).collect();
        let config = TapConfig::with_fields(fields);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("maximum of 10 fields"));
    }

    #[test]
    fn test_from_value_rejects_eleven_fields() {
        let fields: Vec<String> = (0..11).map(|i| format!("f{i}")).collect();
        let err = TapConfig::from_value(json!({ "fields": fields })).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(TapConfig::from_json("not json").is_err());
        assert!(TapConfig::from_json(r#"{"fields": "name"}"#).is_err());
    }

    #[test]
    fn test_parse_api_url() {
        let config =
            TapConfig::from_value(json!({ "api_url": "http://localhost:8080/v3.1" })).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8080/v3.1"));

        let config = TapConfig::new().with_api_url("http://localhost:9090");
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:9090"));
    }

    #[test]
    fn test_config_schema_shape() {
        let schema = config_schema().to_json();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["fields"]["type"], "array");
        assert_eq!(schema["properties"]["fields"]["items"]["type"], "string");
    }
}
