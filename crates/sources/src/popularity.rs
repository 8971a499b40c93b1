//! Popularity fallback signal.

use crate::aggregate::AggregatedInteractions;
use crate::normalize::min_max_scale;
use crate::ScoreVector;
use data_loader::Catalog;
use ndarray::Array1;

/// Total aggregated weight each catalog movie received from all users,
/// min-max scaled. Interactions with movies outside the catalog are ignored.
pub fn popularity_scores(catalog: &Catalog, agg: &AggregatedInteractions) -> ScoreVector {
    let mut totals = Array1::zeros(catalog.len());
    for (&(_, movie), &weight) in agg.iter() {
        if let Some(pos) = catalog.position(movie) {
            totals[pos] += weight;
        }
    }
    min_max_scale(&totals)
}
