//! Record validation against a declared schema
//!
//! Checks each extracted record for type conformance before it is emitted.
//! Absent and null values pass property validation; presence is enforced
//! only for the schema's required properties and the stream's primary key.

use super::types::{AdditionalProperties, JsonSchema, SchemaProperty};
use crate::error::{Error, Result};
use serde_json::Value;

/// Validate a record against a schema
pub fn validate_record(stream: &str, schema: &JsonSchema, record: &Value) -> Result<()> {
    let Some(obj) = record.as_object() else {
        return Err(Error::schema_validation(
            stream,
            format!("expected an object record, got {}", type_name(record)),
        ));
    };

    for name in &schema.required {
        match obj.get(name) {
            None | Some(Value::Null) => {
                return Err(Error::schema_validation(
                    stream,
                    format!("required property '{name}' is missing or null"),
                ));
            }
            Some(_) => {}
        }
    }

    for (name, value) in obj {
        if let Some(property) = schema.get_property(name) {
            validate_value(stream, name, property, value)?;
        } else if !schema.additional_properties {
            return Err(Error::schema_validation(
                stream,
                format!("unexpected property '{name}'"),
            ));
        }
    }

    Ok(())
}

/// Validate that every primary key property is present and non-empty
pub fn validate_primary_key(stream: &str, key_properties: &[&str], record: &Value) -> Result<()> {
    for key in key_properties {
        let value = record.get(key).ok_or_else(|| {
            Error::schema_validation(stream, format!("primary key '{key}' is missing"))
        })?;
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            return Err(Error::schema_validation(
                stream,
                format!("primary key '{key}' is empty"),
            ));
        }
    }
    Ok(())
}

/// Validate a single value against a property schema
fn validate_value(stream: &str, path: &str, property: &SchemaProperty, value: &Value) -> Result<()> {
    // Sparse source data: null passes, presence is a record-level concern
    if value.is_null() {
        return Ok(());
    }

    if !property.json_type.matches(value) {
        return Err(Error::schema_validation(
            stream,
            format!(
                "property '{path}' expected {}, got {}",
                describe_type(property),
                type_name(value)
            ),
        ));
    }

    if let Value::Object(obj) = value {
        for (name, nested_value) in obj {
            let nested_path = format!("{path}.{name}");
            if let Some(nested) = property.properties.as_ref().and_then(|p| p.get(name)) {
                validate_value(stream, &nested_path, nested, nested_value)?;
            } else {
                match &property.additional_properties {
                    Some(AdditionalProperties::Allowed(false)) => {
                        return Err(Error::schema_validation(
                            stream,
                            format!("unexpected property '{nested_path}'"),
                        ));
                    }
                    Some(AdditionalProperties::Schema(values)) => {
                        validate_value(stream, &nested_path, values, nested_value)?;
                    }
                    Some(AdditionalProperties::Allowed(true)) | None => {}
                }
            }
        }
    }

    if let (Value::Array(items), Some(item_schema)) = (value, &property.items) {
        for (index, item) in items.iter().enumerate() {
            validate_value(stream, &format!("{path}[{index}]"), item_schema, item)?;
        }
    }

    Ok(())
}

/// Human-readable name for a declared property type
fn describe_type(property: &SchemaProperty) -> String {
    property
        .json_type
        .primary_type()
        .map_or_else(|| "null".to_string(), ToString::to_string)
}

/// Human-readable name for a JSON value's type
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
