//! Tests for decoder module

use super::*;
use serde_json::json;

#[test]
fn test_json_decoder_root_array() {
    let body = r#"[{"cca3": "NLD"}, {"cca3": "BEL"}]"#;

    let decoder = JsonDecoder::new();
    let records = decoder.decode(body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["cca3"], "NLD");
    assert_eq!(records[1]["cca3"], "BEL");
}

#[test]
fn test_json_decoder_wildcard_path() {
    // The canonical path for a top-level array response
    let body = r#"[{"cca3": "NLD"}, {"cca3": "BEL"}, {"cca3": "LUX"}]"#;

    let decoder = JsonDecoder::with_path("$[*]");
    let records = decoder.decode(body).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["cca3"], "LUX");
}

#[test]
fn test_json_decoder_simple_path() {
    let body = r#"{"data": {"countries": [{"cca3": "NLD"}]}}"#;

    let decoder = JsonDecoder::with_path("data.countries");
    let records = decoder.decode(body).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["cca3"], "NLD");
}

#[test]
fn test_json_decoder_missing_path() {
    let decoder = JsonDecoder::with_path("data.missing");
    let records = decoder.decode(r#"{"data": {}}"#).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_json_decoder_single_object() {
    // A non-array response becomes one record
    let decoder = JsonDecoder::new();
    let records = decoder.decode(r#"{"cca3": "NLD"}"#).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_json_decoder_invalid_body() {
    let decoder = JsonDecoder::new();
    let err = decoder.decode("not json at all").unwrap_err();
    assert!(err.to_string().contains("Failed to parse JSON"));
}

#[test]
fn test_json_decoder_decode_raw() {
    let decoder = JsonDecoder::with_path("$[*]");
    let raw = decoder.decode_raw(r#"[{"cca3": "NLD"}]"#).unwrap();
    assert_eq!(raw, json!([{"cca3": "NLD"}]));
}
