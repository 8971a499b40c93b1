//! Core domain types shared by every crate in the workspace.
//!
//! - Type aliases for domain clarity (UserId, MovieId)
//! - `Movie` and `Interaction` records as yielded by a data provider
//! - `Catalog`, an insertion-ordered movie container. Its iteration order is
//!   the coordinate system every score vector is aligned to.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Earliest release year accepted by the parser
pub const MIN_RELEASE_YEAR: u16 = 1800;

/// Latest release year accepted by the parser
pub const MAX_RELEASE_YEAR: u16 = 3000;

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog.
///
/// Immutable once loaded for a single recommendation run. Empty fields are
/// empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    /// Genre tags; order is kept for display but ignored for matching
    pub genres: Vec<String>,
    /// Release year within [1800, 3000], or `None` when unknown
    pub release_year: Option<u16>,
}

impl Movie {
    /// Convenience constructor for a movie with no release year
    pub fn new(id: MovieId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            genres: Vec::new(),
            release_year: None,
        }
    }

    /// Builder-style setter for genres
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for the release year
    pub fn with_release_year(mut self, year: u16) -> Self {
        self.release_year = Some(year);
        self
    }

    /// The text used for term weighting: title, description and space-joined genres
    pub fn document_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.genres.join(" "))
    }
}

// =============================================================================
// Interactions
// =============================================================================

/// Where an interaction record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Rating,
    Favorite,
    Watchlist,
}

impl InteractionKind {
    /// Weight of a record of this kind. Only ratings use `rating` (0-5 scale).
    pub fn weight(self, rating: f64) -> f64 {
        match self {
            InteractionKind::Rating => (rating / 5.0).clamp(0.0, 1.0),
            InteractionKind::Favorite => 1.0,
            InteractionKind::Watchlist => 0.4,
        }
    }
}

/// A single (user, movie, score) record, with the score already in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: f64,
}

impl Interaction {
    pub fn new(user_id: UserId, movie_id: MovieId, score: f64) -> Self {
        Self {
            user_id,
            movie_id,
            score,
        }
    }

    /// Weighted record of the given kind
    pub fn of_kind(kind: InteractionKind, user_id: UserId, movie_id: MovieId, rating: f64) -> Self {
        Self::new(user_id, movie_id, kind.weight(rating))
    }

    /// Rating on a 0-5 scale, mapped to rating / 5 and clamped to [0, 1]
    pub fn from_rating(user_id: UserId, movie_id: MovieId, rating: f64) -> Self {
        Self::of_kind(InteractionKind::Rating, user_id, movie_id, rating)
    }

    pub fn favorite(user_id: UserId, movie_id: MovieId) -> Self {
        Self::of_kind(InteractionKind::Favorite, user_id, movie_id, 0.0)
    }

    pub fn watchlist(user_id: UserId, movie_id: MovieId) -> Self {
        Self::of_kind(InteractionKind::Watchlist, user_id, movie_id, 0.0)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Insertion-ordered collection of movies keyed by id.
///
/// Inserting a movie whose id is already present replaces the stored movie
/// but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    positions: HashMap<MovieId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a movie
    pub fn insert(&mut self, movie: Movie) {
        match self.positions.get(&movie.id) {
            Some(&pos) => self.movies[pos] = movie,
            None => {
                self.positions.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Position of a movie in catalog order
    pub fn position(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Movie ids in catalog order
    pub fn movie_ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|m| m.id).collect()
    }

    /// Term-weighting documents in catalog order
    pub fn documents(&self) -> Vec<String> {
        self.movies.iter().map(Movie::document_text).collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<T: IntoIterator<Item = Movie>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for movie in iter {
            catalog.insert(movie);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

/// Everything one top-level call needs, fetched once from a provider
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub catalog: Catalog,
    pub interactions: Vec<Interaction>,
}
