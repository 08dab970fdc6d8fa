//! HTTP client module
//!
//! Provides the HTTP client used for the single API fetch.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Timeouts**: Per-client and per-request timeouts

mod client;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
