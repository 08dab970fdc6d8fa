// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-restcountries
//!
//! A Rust-native tap for the REST Countries v3.1 API.
//!
//! The tap fetches the full country reference dataset in a single request,
//! validates every record against a declared JSON schema, and emits the
//! records in a line-delimited JSON message protocol.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use serde_json::json;
//! use tap_restcountries::tap::{Connector, TapRestCountries};
//!
//! #[tokio::main]
//! async fn main() -> tap_restcountries::Result<()> {
//!     let tap = TapRestCountries::new();
//!
//!     // Discover available streams
//!     let catalog = tap.discover().await?;
//!
//!     // Read data
//!     let config = json!({ "fields": ["name", "capital", "cca3"] });
//!     let mut stream = tap.read(&config).await?;
//!     while let Some(msg) = stream.next().await {
//!         // Process messages
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Connector Interface                        │
//! │  spec() → ConnectorSpec    check() → CheckResult                │
//! │  discover() → Catalog      read(config) → Stream<Message>      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   HTTP   │ Paginate  │    Decode     │  Schema   │   Engine    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ GET      │ Single    │ JSON          │ Declare   │ Fetch       │
//! │ Retry    │ Page      │ JSONPath      │ Validate  │ Validate    │
//! │ Backoff  │           │ $[*]          │           │ Emit        │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// HTTP client with retry and backoff
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response decoders
pub mod decode;

/// Schema declaration and validation
pub mod schema;

/// Stream definitions
pub mod streams;

/// Sync state
pub mod state;

/// Main execution engine
pub mod engine;

/// Connector trait and the tap implementation
pub mod tap;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use tap::{Connector, TapRestCountries};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
