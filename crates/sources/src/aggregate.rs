//! Interaction aggregation.
//!
//! Merges raw interaction records into one weight per (user, movie) pair.
//! Repeated records for a pair are summed, so a user who both favorited and
//! reviewed a movie carries the combined weight. No upper bound is applied.

use data_loader::{Interaction, MovieId, UserId};
use std::collections::BTreeMap;

/// Summed interaction weight per (user, movie) pair.
///
/// Backed by a BTreeMap so iteration (and any floating-point sum over it)
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedInteractions {
    weights: BTreeMap<(UserId, MovieId), f64>,
}

impl AggregatedInteractions {
    /// Sum every record into its (user, movie) slot
    pub fn from_interactions<'a, I>(interactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Interaction>,
    {
        let mut weights = BTreeMap::new();
        for interaction in interactions {
            *weights
                .entry((interaction.user_id, interaction.movie_id))
                .or_insert(0.0) += interaction.score;
        }
        Self { weights }
    }

    /// Aggregated weight for a pair, if the user ever interacted with the movie
    pub fn weight(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        self.weights.get(&(user_id, movie_id)).copied()
    }

    /// Whether the user has at least one record for the movie
    pub fn contains(&self, user_id: UserId, movie_id: MovieId) -> bool {
        self.weights.contains_key(&(user_id, movie_id))
    }

    /// Distinct user ids, ascending
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.weights.keys().map(|&(user, _)| user).collect();
        // keys are ordered by user first, so duplicates are adjacent
        users.dedup();
        users
    }

    /// Iterate ((user, movie), weight) in key order
    pub fn iter(&self) -> impl Iterator<Item = (&(UserId, MovieId), &f64)> {
        self.weights.iter()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Aggregate a list of interaction records
pub fn aggregate_interactions(interactions: &[Interaction]) -> AggregatedInteractions {
    AggregatedInteractions::from_interactions(interactions)
}
