//! Core traits for the search filtering pipeline.

use crate::types::SearchResult;
use anyhow::Result;

/// A composable filter over scored search results.
///
/// Filters take ownership of the results and return the survivors in their
/// original order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of results
    fn apply(&self, results: Vec<SearchResult>) -> Result<Vec<SearchResult>>;
}
