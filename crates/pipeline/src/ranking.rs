//! Ranking and truncation for both result modes.

use crate::sort::{cmp_score, SortPolicy};
use crate::types::{Recommendation, SearchResult};
use data_loader::Catalog;
use sources::ScoreVector;
use tracing::debug;

/// Turn final scores (aligned to catalog order) into a recommendation list.
///
/// Sorted by score descending with catalog order breaking ties; non-positive
/// scores are dropped before truncating to `top_n`.
pub fn rank_recommendations(
    catalog: &Catalog,
    scores: &ScoreVector,
    top_n: usize,
) -> Vec<Recommendation> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| cmp_score(b.1, a.1));

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .filter(|&(_, score)| score > 0.0)
        .take(top_n)
        .filter_map(|(pos, score)| {
            catalog.movies().get(pos).map(|movie| Recommendation {
                movie_id: movie.id,
                score,
                title: movie.title.clone(),
            })
        })
        .collect();

    debug!(
        "Ranked {} scores into {} recommendations",
        scores.len(),
        recommendations.len()
    );
    recommendations
}

/// Order filtered search results by `sort` and truncate to `top_n`.
///
/// Score-keyed policies additionally drop non-positive scores; title and
/// release orderings, and unknown keys not starting with `score`, keep them.
pub fn rank_search_results(
    mut results: Vec<SearchResult>,
    sort: impl Into<SortPolicy>,
    top_n: usize,
) -> Vec<SearchResult> {
    let sort = sort.into();
    sort.apply(&mut results);
    if sort.drop_non_positive {
        results.retain(|r| r.score > 0.0);
    }
    results.truncate(top_n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortKey;
    use data_loader::Movie;
    use ndarray::array;

    fn catalog() -> Catalog {
        (1..=5)
            .map(|id| Movie::new(id, format!("Movie {id}"), ""))
            .collect()
    }

    #[test]
    fn test_recommendations_sorted_and_truncated() {
        let scores = array![0.2, 0.9, 0.0, 0.5, 0.7];
        let recs = rank_recommendations(&catalog(), &scores, 2);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].movie_id, 2);
        assert_eq!(recs[0].title, "Movie 2");
        assert_eq!(recs[1].movie_id, 5);
    }

    #[test]
    fn test_recommendations_drop_non_positive() {
        let scores = array![0.0, 0.4, -0.1, 0.0, 0.0];
        let recs = rank_recommendations(&catalog(), &scores, 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 2);
    }

    #[test]
    fn test_recommendation_ties_keep_catalog_order() {
        let scores = array![0.5, 0.5, 1.0, 0.5, 0.0];
        let ids: Vec<u32> = rank_recommendations(&catalog(), &scores, 10)
            .iter()
            .map(|r| r.movie_id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    fn result(id: u32, title: &str, score: f64) -> SearchResult {
        SearchResult {
            movie_id: id,
            title: title.to_string(),
            score,
            release_year: None,
            genres: vec![],
        }
    }

    #[test]
    fn test_score_sort_drops_zero_scores() {
        let results = vec![result(1, "A", 0.0), result(2, "B", 0.3)];
        let ranked = rank_search_results(results, SortKey::ScoreAsc, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].movie_id, 2);
    }

    #[test]
    fn test_title_sort_keeps_zero_scores() {
        let results = vec![result(1, "Zeta", 0.8), result(2, "Alpha", 0.0)];
        let ranked = rank_search_results(results, SortKey::TitleAsc, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Alpha");
    }

    #[test]
    fn test_unknown_key_keeps_zero_scores_unless_score_prefixed() {
        let results = || vec![result(1, "Zeta", 0.6), result(2, "Alpha", 0.0)];

        let ranked = rank_search_results(results(), SortPolicy::parse("relevance"), 10);
        let ids: Vec<u32> = ranked.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![1, 2]);

        let ranked = rank_search_results(results(), SortPolicy::parse("score-foo"), 10);
        let ids: Vec<u32> = ranked.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_truncation() {
        let results = (1..=5).map(|i| result(i, "X", i as f64 / 10.0)).collect();
        let ranked = rank_search_results(results, SortKey::ScoreDesc, 2);
        let ids: Vec<u32> = ranked.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![5, 4]);
    }
}
