//! Release-year window filter.

use crate::traits::Filter;
use crate::types::SearchResult;
use anyhow::Result;

/// Keeps results released within an inclusive year window.
///
/// Results with no release year are always dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRangeFilter {
    min: u16,
    max: u16,
}

impl YearRangeFilter {
    /// Reversed bounds are swapped
    pub fn new(min: u16, max: u16) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from optional bounds. A single bound selects that exact year;
    /// no bounds means no filter.
    pub fn from_bounds(min: Option<u16>, max: Option<u16>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(min), None) => Some(Self::new(min, min)),
            (None, Some(max)) => Some(Self::new(max, max)),
            (Some(min), Some(max)) => Some(Self::new(min, max)),
        }
    }

    pub fn bounds(&self) -> (u16, u16) {
        (self.min, self.max)
    }

    fn accepts(&self, year: Option<u16>) -> bool {
        year.is_some_and(|y| (self.min..=self.max).contains(&y))
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn apply(&self, results: Vec<SearchResult>) -> Result<Vec<SearchResult>> {
        Ok(results
            .into_iter()
            .filter(|r| self.accepts(r.release_year))
            .collect())
    }
}
