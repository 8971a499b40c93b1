//! Result records returned to callers.
//!
//! Field names are part of the output contract: downstream consumers parse
//! the serialized lists.

use data_loader::{Movie, MovieId};
use serde::{Deserialize, Serialize};

/// One entry of a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub score: f64,
    pub title: String,
}

/// One entry of a keyword search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
    pub release_year: Option<u16>,
    pub genres: Vec<String>,
}

impl SearchResult {
    pub fn from_movie(movie: &Movie, score: f64) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            score,
            release_year: movie.release_year,
            genres: movie.genres.clone(),
        }
    }
}
