//! Stream definitions
//!
//! A stream is one logical resource exposed by the tap, with a name, an
//! endpoint path, a primary key, and a declared record schema. The engine
//! drives any [`RestStream`] through the shared HTTP, pagination, and
//! decoding machinery.

mod countries;

pub use countries::CountriesStream;

use crate::config::TapConfig;
use crate::error::Result;
use crate::schema::JsonSchema;
use crate::types::{StringMap, SyncMode};

/// Root URL of the REST Countries API
pub const URL_BASE: &str = "https://restcountries.com/v3.1";

/// A REST resource exposed as a tap stream
pub trait RestStream: Send + Sync {
    /// Unique stream name
    fn name(&self) -> &str;

    /// Endpoint path relative to the API base URL
    fn path(&self) -> &str;

    /// Primary key properties
    fn primary_key(&self) -> &[&str];

    /// Replication key, if the stream supports incremental sync
    fn replication_key(&self) -> Option<&str> {
        None
    }

    /// JSONPath selecting the records in the response body
    fn records_path(&self) -> &str {
        "$[*]"
    }

    /// Declared schema of the stream's records
    fn schema(&self) -> &JsonSchema;

    /// Query parameters for the request, derived from the tap config
    ///
    /// Fails with a configuration error before any request is issued when
    /// the config violates a stream constraint.
    fn url_params(&self, config: &TapConfig) -> Result<StringMap>;

    /// Sync modes this stream supports
    fn supported_sync_modes(&self) -> Vec<SyncMode> {
        if self.replication_key().is_some() {
            vec![SyncMode::FullRefresh, SyncMode::Incremental]
        } else {
            vec![SyncMode::FullRefresh]
        }
    }
}
