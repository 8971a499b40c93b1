//! Genre intersection filter.

use crate::traits::Filter;
use crate::types::SearchResult;
use anyhow::Result;
use std::collections::HashSet;

/// Keeps results sharing at least one genre with the wanted set.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFilter {
    wanted: HashSet<String>,
}

impl GenreFilter {
    /// Build from genre names. Returns `None` when no non-blank name remains,
    /// since an empty set filters nothing.
    pub fn from_names<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        (!wanted.is_empty()).then_some(Self { wanted })
    }

    fn accepts(&self, genres: &[String]) -> bool {
        genres.iter().any(|g| self.wanted.contains(&normalize(g)))
    }
}

fn normalize(genre: &str) -> String {
    genre.trim().to_lowercase()
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, results: Vec<SearchResult>) -> Result<Vec<SearchResult>> {
        Ok(results
            .into_iter()
            .filter(|r| self.accepts(&r.genres))
            .collect())
    }
}
