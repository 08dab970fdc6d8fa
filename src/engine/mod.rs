//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine drives a stream through the fetch pipeline: build query
//! parameters from the tap config, issue the GET, extract records from the
//! response, validate each record against the declared schema, and emit
//! SCHEMA / RECORD / STATE / LOG messages.

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::config::TapConfig;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{NextPage, PaginationState, Paginator, SinglePagePaginator};
use crate::schema::{validate_primary_key, validate_record};
use crate::state::State;
use crate::streams::RestStream;
use std::collections::HashSet;
use std::time::Instant;

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client (configured with the API base URL)
    client: HttpClient,
    /// Tap state
    state: State,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: State) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the tap state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync a single stream
    pub async fn sync_stream(
        &mut self,
        stream: &dyn RestStream,
        tap_config: &TapConfig,
    ) -> Result<Vec<Message>> {
        let start = Instant::now();
        let stream_name = stream.name().to_string();
        let mut messages = Vec::new();

        messages.push(Message::info(format!(
            "Starting sync for stream: {stream_name}"
        )));

        // Built before any request: a config violation fails the sync here
        let query_params = stream.url_params(tap_config)?;

        messages.push(Message::schema(
            &stream_name,
            stream.schema().to_json(),
            stream.primary_key().iter().map(ToString::to_string).collect(),
        ));

        let decoder = JsonDecoder::with_path(stream.records_path());
        let paginator = SinglePagePaginator::new();

        // The primary key can only be enforced when the field selection
        // actually requests it (or no selection narrows the response)
        let enforce_primary_key = match tap_config.selected_fields() {
            None => true,
            Some(fields) => stream
                .primary_key()
                .iter()
                .all(|key| fields.iter().any(|f| f == key)),
        };
        let mut seen_keys: HashSet<String> = HashSet::new();

        let mut records_emitted: u64 = 0;
        let mut page_count = 0;
        let mut pagination_state = PaginationState::new();

        loop {
            // Build request config with query params
            let mut req_config = RequestConfig::new();
            for (key, value) in &query_params {
                req_config = req_config.query(key, value);
            }
            for (key, value) in paginator.initial_params(&pagination_state) {
                req_config = req_config.query(&key, &value);
            }

            // Make request
            let response = self
                .client
                .get_with_config(stream.path(), req_config)
                .await?;

            page_count += 1;
            self.stats.add_page();

            let body_text = response
                .text()
                .await
                .map_err(|e| Error::decode(format!("Failed to read response body: {e}")))?;
            let response_json: serde_json::Value = serde_json::from_str(&body_text)?;

            // Extract records
            let records = decoder.decode(&body_text)?;
            let record_count = records.len();
            self.stats.add_records(record_count);

            messages.push(Message::debug(format!(
                "Page {page_count}: fetched {record_count} records"
            )));

            // Validate and emit
            for record in records {
                validate_record(&stream_name, stream.schema(), &record)?;

                if enforce_primary_key {
                    validate_primary_key(&stream_name, stream.primary_key(), &record)?;
                    let key = primary_key_value(stream.primary_key(), &record);
                    if !seen_keys.insert(key.clone()) {
                        return Err(Error::schema_validation(
                            &stream_name,
                            format!("duplicate primary key '{key}'"),
                        ));
                    }
                }

                messages.push(Message::record(&stream_name, record));
                records_emitted += 1;

                if self.config.max_records > 0
                    && records_emitted as usize >= self.config.max_records
                {
                    break;
                }
            }

            if self.config.max_records > 0 && records_emitted as usize >= self.config.max_records {
                break;
            }

            // Process pagination
            match paginator.process_response(&response_json, record_count, &mut pagination_state) {
                NextPage::Continue { .. } => {}
                NextPage::Done => break,
            }
        }

        // Full refresh complete: record it and emit the state
        self.state.mark_completed(&stream_name, records_emitted);
        messages.push(Message::state(self.state.to_json()));

        self.stats.add_stream();
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        messages.push(Message::info(format!(
            "Completed sync for {stream_name}: {records_emitted} records in {page_count} pages"
        )));

        Ok(messages)
    }
}

/// Join the primary key values of a record into a single comparable string
fn primary_key_value(key_properties: &[&str], record: &serde_json::Value) -> String {
    key_properties
        .iter()
        .map(|key| match record.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests;
