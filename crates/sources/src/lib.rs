//! # Sources Crate
//!
//! Relevance signals for movie recommendations. Every signal is a
//! `ScoreVector` aligned to catalog order and scaled into [0, 1].
//!
//! ## Components
//!
//! ### Collaborative (item similarity)
//! "Movies that were interacted with by the same users as yours":
//! - Dense movie × user matrix, cosine similarity between movie rows
//! - Score = similarity-weighted sum of the user's own interaction weights
//!
//! ### Content (text profile)
//! - TF-IDF over title, description and genres
//! - User profile = weighted sum of the rows they interacted with
//!
//! ### Hybrid
//! - `alpha * collaborative + (1 - alpha) * content`
//! - Popularity fallback when both signals are empty
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{aggregate_interactions, collaborative_scores, ContentSource,
//!     HybridBlender, UserItemMatrix, popularity_scores};
//!
//! let agg = aggregate_interactions(&snapshot.interactions);
//! let matrix = UserItemMatrix::build(&agg, &snapshot.catalog.movie_ids());
//!
//! let collab = collaborative_scores(user_id, &matrix, &agg);
//! let content = ContentSource::new().scores(user_id, &snapshot.catalog, &agg);
//!
//! let blended = HybridBlender::new(0.6)
//!     .blend(&collab, &content, || popularity_scores(&snapshot.catalog, &agg));
//! ```

use ndarray::Array1;

/// One score per catalog movie, in catalog order
pub type ScoreVector = Array1<f64>;

// Public modules
pub mod aggregate;
pub mod collaborative;
pub mod content;
pub mod hybrid;
pub mod normalize;
pub mod popularity;
pub mod stop_words;
pub mod tfidf;

// Re-export commonly used types
pub use aggregate::{aggregate_interactions, AggregatedInteractions};
pub use collaborative::{collaborative_scores, UserItemMatrix};
pub use content::ContentSource;
pub use hybrid::{Blended, HybridBlender, ScoreBasis, DEFAULT_ALPHA};
pub use normalize::min_max_scale;
pub use popularity::popularity_scores;
pub use tfidf::{cosine_similarity, SparseVector, TextSpace, TfidfVectorizer, DEFAULT_MAX_FEATURES};
