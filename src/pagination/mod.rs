//! Pagination module
//!
//! The REST Countries API returns its entire result set in one response,
//! so the only strategy here is the single-page paginator: it contributes
//! no query parameters and signals "no further pages" after the first
//! response. The `Paginator` trait keeps the engine's fetch loop generic
//! over that contract.

mod strategies;
mod types;

pub use strategies::SinglePagePaginator;
pub use types::{NextPage, PaginationState, Paginator};
