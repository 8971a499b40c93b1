//! Sort policy for keyword search results.

use crate::types::SearchResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Caller-selectable result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    ScoreDesc,
    ScoreAsc,
    TitleAsc,
    TitleDesc,
    ReleaseAsc,
    ReleaseDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::ScoreDesc,
        SortKey::ScoreAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::ReleaseAsc,
        SortKey::ReleaseDesc,
    ];

    /// Look up a recognized key such as `title-asc`
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ScoreDesc => "score-desc",
            SortKey::ScoreAsc => "score-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::ReleaseAsc => "release-asc",
            SortKey::ReleaseDesc => "release-desc",
        }
    }

    /// Score-based orderings also drop non-positive scores after sorting
    pub fn is_score_based(&self) -> bool {
        matches!(self, SortKey::ScoreDesc | SortKey::ScoreAsc)
    }

    /// Stable in-place sort; ties keep their incoming order
    pub fn apply(&self, results: &mut [SearchResult]) {
        match self {
            SortKey::ScoreDesc => results.sort_by(|a, b| cmp_score(b.score, a.score)),
            SortKey::ScoreAsc => results.sort_by(|a, b| cmp_score(a.score, b.score)),
            SortKey::TitleAsc => results.sort_by_cached_key(|r| r.title.to_lowercase()),
            SortKey::TitleDesc => {
                results.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
            }
            SortKey::ReleaseAsc => results.sort_by_key(release_key),
            SortKey::ReleaseDesc => results.sort_by(|a, b| release_key(b).cmp(&release_key(a))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering plus whether non-positive scores are dropped after sorting.
///
/// Unrecognized keys order like `score-desc`, but only drop non-positive
/// scores when they start with `score` (`score-foo` does, `relevance` doesn't).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPolicy {
    pub key: SortKey,
    pub drop_non_positive: bool,
}

impl SortPolicy {
    /// Parse a caller-supplied key. An empty key means `score-desc`.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let normalized = raw.trim().to_ascii_lowercase();
        Self {
            key: SortKey::from_key(&normalized).unwrap_or_default(),
            drop_non_positive: normalized.starts_with("score"),
        }
    }

    pub fn apply(&self, results: &mut [SearchResult]) {
        self.key.apply(results);
    }
}

impl Default for SortPolicy {
    fn default() -> Self {
        SortKey::default().into()
    }
}

impl From<SortKey> for SortPolicy {
    fn from(key: SortKey) -> Self {
        Self {
            key,
            drop_non_positive: key.is_score_based(),
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

/// NaN compares equal so it never reorders its neighbours
pub(crate) fn cmp_score(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn release_key(result: &SearchResult) -> u16 {
    result.release_year.unwrap_or(0)
}
