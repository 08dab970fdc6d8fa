//! Response decoder module
//!
//! Parses the API's JSON response body and extracts the record list using
//! a configured JSON-path expression. The REST Countries API returns a
//! top-level array, so the canonical record path is `$[*]`.

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::RecordDecoder;

#[cfg(test)]
mod tests;
