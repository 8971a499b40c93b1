//! # Data Loader Crate
//!
//! Domain types and the data-provider boundary for the recommender.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Interaction, Catalog)
//! - **parser**: Best-effort parsing of catalog and interaction JSON payloads
//! - **provider**: The `DataProvider` trait plus JSON-file and in-memory providers
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataProvider, JsonFileProvider};
//!
//! let provider = JsonFileProvider::new("data/movies.json")
//!     .with_interactions("data/interactions.json");
//!
//! let snapshot = provider.load_snapshot()?;
//! println!(
//!     "{} movies, {} interactions",
//!     snapshot.catalog.len(),
//!     snapshot.interactions.len()
//! );
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod provider;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{extract_year, parse_genre_list, parse_genres};
pub use provider::{DataProvider, InMemoryProvider, JsonFileProvider};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Catalog,
    DataSnapshot,
    Interaction,
    InteractionKind,
    Movie,
};
