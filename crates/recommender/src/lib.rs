//! Recommendation engine for ReelRecs.
//!
//! Ties the data provider, the relevance signals and the ranking pipeline
//! together behind two entry points: `recommend` and `search`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::JsonFileProvider;
//! use recommender::{EngineConfig, RecommendationEngine, SearchRequest};
//!
//! let provider = JsonFileProvider::new("data/movies.json")
//!     .with_interactions("data/interactions.json");
//! let engine = RecommendationEngine::new(provider, EngineConfig::default())?;
//!
//! let recs = engine.recommend(42, 10, 0.6)?;
//! let hits = engine.search(&SearchRequest::new("space pirates").with_top_n(5))?;
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{validate_alpha, EngineConfig};
pub use error::{EngineError, Result};
pub use orchestrator::{
    recommend_for_user, search_movies_by_keyword, RecommendationEngine, SearchOptions,
    SearchRequest,
};
pub use pipeline::{Recommendation, SearchResult, SortKey, SortPolicy};
