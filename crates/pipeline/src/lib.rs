//! Ranking and filtering of scored movies.
//!
//! This crate provides:
//! - Result types serialized for callers (`Recommendation`, `SearchResult`)
//! - Filter trait, year/genre filters and a FilterPipeline to compose them
//! - Sort policy for keyword search
//! - Ranking and top-N truncation for both modes
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{rank_search_results, FilterPipeline, SortPolicy};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_optional(YearRangeFilter::from_bounds(Some(2000), Some(2010)))
//!     .add_optional(GenreFilter::from_names(["Action"]));
//!
//! let filtered = pipeline.apply(results)?;
//! let ranked = rank_search_results(filtered, SortPolicy::parse("title-asc"), 20);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod ranking;
pub mod sort;
pub mod traits;
pub mod types;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use ranking::{rank_recommendations, rank_search_results};
pub use sort::{SortKey, SortPolicy};
pub use traits::Filter;
pub use types::{Recommendation, SearchResult};
