//! The `countries` stream
//!
//! One record per country from the REST Countries v3.1 API. The API
//! returns the full dataset in a single response; records are keyed by the
//! ISO 3166-1 alpha-3 code (`cca3`).

use super::RestStream;
use crate::config::TapConfig;
use crate::error::Result;
use crate::schema::{JsonSchema, JsonType, SchemaProperty};
use crate::types::StringMap;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Stream of all countries from the REST Countries v3.1 API
#[derive(Debug, Clone, Copy, Default)]
pub struct CountriesStream;

impl CountriesStream {
    /// Create the stream
    pub fn new() -> Self {
        Self
    }
}

impl RestStream for CountriesStream {
    fn name(&self) -> &str {
        "countries"
    }

    fn path(&self) -> &str {
        "/all"
    }

    fn primary_key(&self) -> &[&str] {
        &["cca3"]
    }

    fn schema(&self) -> &JsonSchema {
        &COUNTRIES_SCHEMA
    }

    fn url_params(&self, config: &TapConfig) -> Result<StringMap> {
        config.validate()?;

        let mut params = StringMap::new();
        if let Some(fields) = config.selected_fields() {
            params.insert("fields".to_string(), fields.join(","));
        }
        Ok(params)
    }
}

static COUNTRIES_SCHEMA: Lazy<JsonSchema> = Lazy::new(build_schema);

/// Build a property map from name/schema pairs
fn props<const N: usize>(entries: [(&str, SchemaProperty); N]) -> BTreeMap<String, SchemaProperty> {
    entries
        .into_iter()
        .map(|(name, property)| (name.to_string(), property))
        .collect()
}

fn string() -> SchemaProperty {
    SchemaProperty::new(JsonType::String)
}

fn string_array() -> SchemaProperty {
    SchemaProperty::array(SchemaProperty::new(JsonType::String))
}

fn number_array() -> SchemaProperty {
    SchemaProperty::array(SchemaProperty::new(JsonType::Number))
}

/// Translation entry (official + common name in a language)
fn translation() -> SchemaProperty {
    SchemaProperty::object(props([("official", string()), ("common", string())]))
}

fn build_schema() -> JsonSchema {
    let mut schema = JsonSchema::new()
        .with_title("countries")
        .with_description("A country from the REST Countries v3.1 API");

    // ── Codes ──────────────────────────────────────────────
    schema.add_property(
        "cca2",
        string().with_description("ISO 3166-1 alpha-2 two-letter country code"),
    );
    schema.add_property(
        "cca3",
        string().with_description("ISO 3166-1 alpha-3 three-letter country code"),
    );
    schema.add_property(
        "ccn3",
        string().with_description("ISO 3166-1 numeric code (UN M49)"),
    );
    schema.add_property(
        "cioc",
        string().with_description("Code of the International Olympic Committee"),
    );
    schema.add_property("fifa", string().with_description("FIFA country code"));

    // ── Status & membership ────────────────────────────────
    schema.add_property(
        "independent",
        SchemaProperty::new(JsonType::Boolean)
            .with_description("ISO 3166-1 independence status"),
    );
    schema.add_property(
        "status",
        string().with_description("ISO 3166-1 assignment status"),
    );
    schema.add_property(
        "unMember",
        SchemaProperty::new(JsonType::Boolean).with_description("UN Member status"),
    );

    // ── Name ───────────────────────────────────────────────
    schema.add_property(
        "name",
        SchemaProperty::object(props([
            ("common", string()),
            ("official", string()),
            (
                "nativeName",
                SchemaProperty::map(translation())
                    .with_description("Native country name per language code"),
            ),
        ]))
        .with_description("Country name (common, official, and native)"),
    );
    schema.add_property(
        "altSpellings",
        string_array().with_description("Alternate spellings of the country name"),
    );
    schema.add_property(
        "translations",
        SchemaProperty::map(translation())
            .with_description("Country name translations keyed by language code"),
    );

    // ── Geography ─────────────────────────────────────────
    schema.add_property(
        "area",
        SchemaProperty::new(JsonType::Number).with_description("Geographical size in km²"),
    );
    schema.add_property(
        "borders",
        string_array().with_description("Border countries (cca3 codes)"),
    );
    schema.add_property("capital", string_array().with_description("Capital cities"));
    schema.add_property(
        "capitalInfo",
        SchemaProperty::object(props([(
            "latlng",
            number_array().with_description("Capital latitude and longitude"),
        )]))
        .with_description("Capital city geolocation info"),
    );
    schema.add_property(
        "continents",
        string_array().with_description("Continents the country is on"),
    );
    schema.add_property(
        "landlocked",
        SchemaProperty::new(JsonType::Boolean)
            .with_description("Whether the country is landlocked"),
    );
    schema.add_property(
        "latlng",
        number_array().with_description("Country latitude and longitude"),
    );
    schema.add_property(
        "maps",
        SchemaProperty::object(props([
            ("googleMaps", string()),
            ("openStreetMaps", string()),
        ]))
        .with_description("Links to Google Maps and OpenStreetMap"),
    );
    schema.add_property("region", string().with_description("UN demographic region"));
    schema.add_property(
        "subregion",
        string().with_description("UN demographic subregion"),
    );
    schema.add_property(
        "timezones",
        string_array().with_description("List of timezones"),
    );

    // ── People & culture ──────────────────────────────────
    schema.add_property(
        "population",
        SchemaProperty::new(JsonType::Integer).with_description("Country population"),
    );
    schema.add_property(
        "languages",
        SchemaProperty::map(string())
            .with_description("Official languages keyed by language code"),
    );
    schema.add_property(
        "demonyms",
        SchemaProperty::map(SchemaProperty::object(props([
            ("f", string()),
            ("m", string()),
        ])))
        .with_description("Genderized demonyms keyed by language code"),
    );

    // ── Practical info ────────────────────────────────────
    schema.add_property(
        "currencies",
        SchemaProperty::map(SchemaProperty::object(props([
            ("name", string()),
            ("symbol", string()),
        ])))
        .with_description("Currencies keyed by currency code"),
    );
    schema.add_property(
        "idd",
        SchemaProperty::object(props([("root", string()), ("suffixes", string_array())]))
            .with_description("International dialing codes"),
    );
    schema.add_property(
        "tld",
        string_array().with_description("Internet top-level domains"),
    );
    schema.add_property(
        "postalCode",
        SchemaProperty::object(props([("format", string()), ("regex", string())]))
            .with_description("Postal code format and regex"),
    );
    schema.add_property(
        "startOfWeek",
        string().with_description("Day of the start of the week"),
    );
    schema.add_property(
        "car",
        SchemaProperty::object(props([("signs", string_array()), ("side", string())]))
            .with_description("Car signs and driving side"),
    );

    // ── Indices & misc ────────────────────────────────────
    schema.add_property(
        "gini",
        SchemaProperty::map(SchemaProperty::new(JsonType::Number))
            .with_description("Worldbank Gini index keyed by year"),
    );

    // ── Visual assets ─────────────────────────────────────
    schema.add_property("flag", string().with_description("Flag emoji"));
    schema.add_property(
        "flags",
        SchemaProperty::object(props([
            ("png", string()),
            ("svg", string()),
            ("alt", string()),
        ]))
        .with_description("Links to flag images (png and svg)"),
    );
    schema.add_property(
        "coatOfArms",
        SchemaProperty::object(props([("png", string()), ("svg", string())]))
            .with_description("Links to coat of arms images"),
    );

    schema
}
