//! Text-profile content scoring.
//!
//! Builds a taste profile for the user by summing the TF-IDF rows of every
//! catalog movie they interacted with, weighted by the aggregated interaction
//! weight, and scores each movie by cosine similarity to that profile.

use crate::aggregate::AggregatedInteractions;
use crate::normalize::min_max_scale;
use crate::tfidf::{TfidfVectorizer, DEFAULT_MAX_FEATURES};
use crate::ScoreVector;
use data_loader::{Catalog, UserId};
use ndarray::Array1;
use tracing::{debug, instrument};

/// Content-based signal source
#[derive(Debug, Clone, Copy)]
pub struct ContentSource {
    max_features: usize,
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Configure the vocabulary cap (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Content scores in catalog order, in [0, 1]
    ///
    /// All zeros when the user has no interaction with any catalog movie.
    #[instrument(skip(self, catalog, agg), fields(movies = catalog.len()))]
    pub fn scores(
        &self,
        user_id: UserId,
        catalog: &Catalog,
        agg: &AggregatedInteractions,
    ) -> ScoreVector {
        let interacted: Vec<(usize, f64)> = catalog
            .iter()
            .enumerate()
            .filter_map(|(i, movie)| agg.weight(user_id, movie.id).map(|w| (i, w)))
            .collect();

        if interacted.is_empty() {
            debug!("User {} has no catalog interactions; content signal is empty", user_id);
            return Array1::zeros(catalog.len());
        }

        let space = TfidfVectorizer::new()
            .with_max_features(self.max_features)
            .fit_transform(&catalog.documents());

        let mut profile = Array1::zeros(space.vocabulary_len());
        for &(i, weight) in &interacted {
            if let Some(row) = space.row(i) {
                row.add_scaled_to(&mut profile, weight);
            }
        }

        let mut scores = space.similarities_to_dense(&profile);
        for &(i, _) in &interacted {
            scores[i] = 0.0;
        }

        debug!(
            "Built content profile from {} movies over {} terms",
            interacted.len(),
            space.vocabulary_len()
        );
        min_max_scale(&scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Interaction, Movie};

    fn catalog() -> Catalog {
        vec![
            Movie::new(1, "Galaxy Raiders", "Pirates battle across the galaxy")
                .with_genres(["SciFi"]),
            Movie::new(2, "Galaxy Raiders Return", "More pirates in the galaxy")
                .with_genres(["SciFi"]),
            Movie::new(3, "Baking Hearts", "A romance in a small bakery")
                .with_genres(["Romance"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_similar_text_scores_highest() {
        let agg = AggregatedInteractions::from_interactions(&[Interaction::favorite(1, 1)]);
        let scores = ContentSource::new().scores(1, &catalog(), &agg);

        assert_eq!(scores[0], 0.0, "interacted movie must be zeroed");
        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_user_without_catalog_interactions() {
        let agg = AggregatedInteractions::from_interactions(&[Interaction::favorite(1, 999)]);
        let scores = ContentSource::new().scores(1, &catalog(), &agg);
        assert_eq!(scores.to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stop_word_only_catalog_gives_zeros() {
        let catalog: Catalog = vec![Movie::new(1, "The", "of and"), Movie::new(2, "A", "the")]
            .into_iter()
            .collect();
        let agg = AggregatedInteractions::from_interactions(&[Interaction::favorite(1, 1)]);
        let scores = ContentSource::new().scores(1, &catalog, &agg);
        assert_eq!(scores.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_profile_follows_interaction_weight() {
        let catalog: Catalog = vec![
            Movie::new(1, "Robot Uprising", "machines revolt"),
            Movie::new(2, "Robot Uprising Returns", "machines revolt"),
            Movie::new(3, "Garden Romance", "flowers bloom"),
            Movie::new(4, "Garden Romance Reprise", "flowers bloom"),
        ]
        .into_iter()
        .collect();
        let agg = AggregatedInteractions::from_interactions(&[
            Interaction::new(1, 1, 1.0),
            Interaction::new(1, 3, 0.2),
        ]);
        let scores = ContentSource::new().scores(1, &catalog, &agg);

        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[2], 0.0);
        assert_eq!(scores[1], 1.0);
        assert!(scores[3] > 0.0 && scores[3] < 1.0, "got {}", scores[3]);
        assert!((scores[3] - 0.2).abs() < 1e-9);
    }
}
