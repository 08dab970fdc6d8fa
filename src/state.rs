//! State types for tracking sync progress
//!
//! The tap is full-refresh only, so there are no cursors: state records
//! only that a stream's refresh completed, when, and how many records it
//! produced. These types are serialized into STATE messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: HashMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// Check if a stream's full refresh has completed
    pub fn is_completed(&self, stream: &str) -> bool {
        self.streams.get(stream).is_some_and(|s| s.completed)
    }

    /// Mark a stream's full refresh as completed
    pub fn mark_completed(&mut self, stream: &str, records_synced: u64) {
        let stream_state = self.get_stream_mut(stream);
        stream_state.completed = true;
        stream_state.records_synced = records_synced;
        stream_state.completed_at = Some(Utc::now());
    }

    /// Serialize to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamState {
    /// Whether the full refresh completed
    #[serde(default)]
    pub completed: bool,

    /// Records emitted by the completed refresh
    #[serde(default)]
    pub records_synced: u64,

    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
