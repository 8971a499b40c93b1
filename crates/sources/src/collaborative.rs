//! Item-similarity collaborative scoring.
//!
//! ## Algorithm
//! 1. Build a dense movie × user matrix of aggregated weights, rows in
//!    catalog order, columns in ascending user id order
//! 2. L2-normalise each movie row (all-zero rows stay zero)
//! 3. Item similarity = X · Xᵀ (cosine between movie rows)
//! 4. Raw score for movie i = Σ_j sim(i, j) × weight(user, j)
//! 5. Zero the movies the user already interacted with, then min-max scale
//!
//! Unknown users, or users whose weights are all zero, get an all-zero vector.

use crate::aggregate::AggregatedInteractions;
use crate::normalize::min_max_scale;
use crate::ScoreVector;
use data_loader::{MovieId, UserId};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Dense user-item weight matrix aligned to catalog order
#[derive(Debug, Clone)]
pub struct UserItemMatrix {
    movie_ids: Vec<MovieId>,
    user_ids: Vec<UserId>,
    /// shape (movies, users)
    weights: Array2<f64>,
}

impl UserItemMatrix {
    /// Lay out aggregated weights for `movie_ids`. Pairs for movies outside
    /// `movie_ids` are ignored.
    pub fn build(agg: &AggregatedInteractions, movie_ids: &[MovieId]) -> Self {
        let user_ids = agg.user_ids();
        let user_cols: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let movie_rows: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let mut weights = Array2::zeros((movie_ids.len(), user_ids.len()));
        for (&(user, movie), &w) in agg.iter() {
            if let (Some(&row), Some(&col)) = (movie_rows.get(&movie), user_cols.get(&user)) {
                weights[[row, col]] = w;
            }
        }

        Self {
            movie_ids: movie_ids.to_vec(),
            user_ids,
            weights,
        }
    }

    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Weights of one user across all movies, if the user has a column
    pub fn user_column(&self, user_id: UserId) -> Option<ArrayView1<'_, f64>> {
        let col = self.user_ids.binary_search(&user_id).ok()?;
        Some(self.weights.column(col))
    }

    /// Cosine similarity between every pair of movie rows
    pub fn item_similarity(&self) -> Array2<f64> {
        let mut normalized = self.weights.clone();
        for mut row in normalized.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }
        normalized.dot(&normalized.t())
    }
}

/// Collaborative scores for `user_id`, one per row of `matrix`, in [0, 1]
#[instrument(skip(matrix, agg), fields(movies = matrix.movie_ids.len(), users = matrix.user_ids.len()))]
pub fn collaborative_scores(
    user_id: UserId,
    matrix: &UserItemMatrix,
    agg: &AggregatedInteractions,
) -> ScoreVector {
    let n_movies = matrix.movie_ids.len();

    let Some(user_weights) = matrix.user_column(user_id) else {
        debug!("User {} has no interactions; collaborative signal is empty", user_id);
        return Array1::zeros(n_movies);
    };
    if user_weights.sum() == 0.0 {
        debug!("User {} has only zero-weight interactions", user_id);
        return Array1::zeros(n_movies);
    }

    let similarity = matrix.item_similarity();
    let mut scores = similarity.dot(&user_weights);

    for (i, &movie) in matrix.movie_ids.iter().enumerate() {
        if agg.contains(user_id, movie) {
            scores[i] = 0.0;
        }
    }

    debug!("Scored {} movies collaboratively", n_movies);
    min_max_scale(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Interaction;

    fn agg(records: &[(UserId, MovieId, f64)]) -> AggregatedInteractions {
        let interactions: Vec<Interaction> = records
            .iter()
            .map(|&(u, m, s)| Interaction::new(u, m, s))
            .collect();
        AggregatedInteractions::from_interactions(&interactions)
    }

    #[test]
    fn test_matrix_layout() {
        let agg = agg(&[(7, 2, 1.0), (3, 1, 0.5), (3, 99, 1.0)]);
        let matrix = UserItemMatrix::build(&agg, &[1, 2, 3]);

        assert_eq!(matrix.user_ids(), &[3, 7]);
        assert_eq!(matrix.weights().dim(), (3, 2));
        assert_eq!(matrix.weights()[[0, 0]], 0.5);
        assert_eq!(matrix.weights()[[1, 1]], 1.0);
        assert_eq!(matrix.weights().sum(), 1.5);
    }

    #[test]
    fn test_item_similarity_is_cosine() {
        let agg = agg(&[(1, 10, 1.0), (2, 10, 1.0), (1, 20, 2.0), (2, 20, 2.0), (3, 30, 1.0)]);
        let sim = UserItemMatrix::build(&agg, &[10, 20, 30, 40]).item_similarity();

        assert!((sim[[0, 1]] - 1.0).abs() < 1e-12);
        assert_eq!(sim[[0, 2]], 0.0);
        // movie without interactions stays a zero row
        assert_eq!(sim.row(3).sum(), 0.0);
    }

    #[test]
    fn test_unknown_user_gets_zeros() {
        let agg = agg(&[(1, 10, 1.0)]);
        let matrix = UserItemMatrix::build(&agg, &[10, 20]);
        assert_eq!(collaborative_scores(42, &matrix, &agg).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_zero_weight_user_gets_zeros() {
        let agg = agg(&[(1, 10, 0.0), (2, 10, 1.0), (2, 20, 1.0)]);
        let matrix = UserItemMatrix::build(&agg, &[10, 20]);
        assert_eq!(collaborative_scores(1, &matrix, &agg).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_co_watched_movie_scores_highest() {
        // users 2 and 3 watched 10 together with 20; 30 only with user 4
        let agg = agg(&[
            (1, 10, 1.0),
            (2, 10, 1.0),
            (2, 20, 1.0),
            (3, 10, 1.0),
            (3, 20, 1.0),
            (4, 30, 1.0),
        ]);
        let matrix = UserItemMatrix::build(&agg, &[10, 20, 30]);
        let scores = collaborative_scores(1, &matrix, &agg);

        assert_eq!(scores[0], 0.0, "interacted movie must be zeroed");
        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_stronger_interactions_pull_harder() {
        // user 1 likes 10 strongly and 20 weakly; 30 pairs with 10, 40 with 20
        let agg = agg(&[
            (1, 10, 1.0),
            (1, 20, 0.2),
            (2, 10, 1.0),
            (2, 30, 1.0),
            (3, 20, 1.0),
            (3, 40, 1.0),
        ]);
        let matrix = UserItemMatrix::build(&agg, &[10, 20, 30, 40]);
        let scores = collaborative_scores(1, &matrix, &agg);

        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 1.0);
        assert!(scores[3] > 0.0 && scores[3] < 1.0, "got {}", scores[3]);
    }
}
