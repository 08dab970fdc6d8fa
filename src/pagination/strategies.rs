//! Pagination strategy implementations

use super::types::{NextPage, PaginationState, Paginator};
use crate::types::StringMap;
use serde_json::Value;

/// Single-page pagination: the API returns the whole result set in one
/// response, so pagination is complete after the first page.
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator;

impl SinglePagePaginator {
    /// Create a new single-page paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for SinglePagePaginator {
    fn initial_params(&self, _state: &PaginationState) -> StringMap {
        StringMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.next_page();
        state.mark_done();
        NextPage::Done
    }
}
