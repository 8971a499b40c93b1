//! Filter implementations for keyword search results.

pub mod genre;
pub mod year_range;

// Re-export for convenience
pub use genre::GenreFilter;
pub use year_range::YearRangeFilter;
