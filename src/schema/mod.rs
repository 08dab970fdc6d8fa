//! Schema declaration and validation module
//!
//! Provides the declarative JSON Schema types used to describe stream
//! records, and a validator that checks extracted records against the
//! declared schema before they are emitted.
//!
//! # Features
//!
//! - **Declarative Types**: string/number/integer/boolean/array/object
//! - **Nullable Unions**: `["string", "null"]` style type arrays
//! - **Keyed Sub-Objects**: typed `additionalProperties` for free-form maps
//! - **Record Validation**: type conformance and required-field checks

mod types;
mod validate;

pub use types::{AdditionalProperties, JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
pub use validate::{validate_primary_key, validate_record};
