//! Data providers: where a recommendation run gets its catalog and interactions.
//!
//! Every top-level call fetches a fresh snapshot from its provider, so
//! implementations must be cheap to call repeatedly and must not hold state
//! between calls.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of catalog and interaction data
pub trait DataProvider: Send + Sync {
    /// Load the movie catalog
    fn load_catalog(&self) -> Result<Catalog>;

    /// Load every interaction record, already weighted into [0, 1]
    fn load_interactions(&self) -> Result<Vec<Interaction>>;

    /// Load both collections for one call
    fn load_snapshot(&self) -> Result<DataSnapshot> {
        Ok(DataSnapshot {
            catalog: self.load_catalog()?,
            interactions: self.load_interactions()?,
        })
    }
}

// =============================================================================
// JSON files
// =============================================================================

/// Reads a catalog JSON file and, optionally, an interactions JSON file.
///
/// Without an interactions file every user is unknown, which is valid:
/// recommendation degrades to the popularity fallback.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    movies_path: PathBuf,
    interactions_path: Option<PathBuf>,
}

impl JsonFileProvider {
    pub fn new(movies_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            interactions_path: None,
        }
    }

    /// Configure the interactions file
    pub fn with_interactions(mut self, path: impl Into<PathBuf>) -> Self {
        self.interactions_path = Some(path.into());
        self
    }

    pub fn movies_path(&self) -> &Path {
        &self.movies_path
    }

    pub fn interactions_path(&self) -> Option<&Path> {
        self.interactions_path.as_deref()
    }
}

impl DataProvider for JsonFileProvider {
    fn load_catalog(&self) -> Result<Catalog> {
        let content = read_file(&self.movies_path)?;
        let catalog = parser::parse_catalog(&content, &self.movies_path.display().to_string())?;
        debug!("Loaded {} movies from {}", catalog.len(), self.movies_path.display());
        Ok(catalog)
    }

    fn load_interactions(&self) -> Result<Vec<Interaction>> {
        let Some(path) = &self.interactions_path else {
            return Ok(Vec::new());
        };
        let content = read_file(path)?;
        let interactions = parser::parse_interactions(&content, &path.display().to_string())?;
        debug!("Loaded {} interactions from {}", interactions.len(), path.display());
        Ok(interactions)
    }

    /// Parse both files in parallel
    fn load_snapshot(&self) -> Result<DataSnapshot> {
        let (catalog, interactions) =
            rayon::join(|| self.load_catalog(), || self.load_interactions());

        Ok(DataSnapshot {
            catalog: catalog?,
            interactions: interactions?,
        })
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

// =============================================================================
// In memory
// =============================================================================

/// Serves clones of collections held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    catalog: Catalog,
    interactions: Vec<Interaction>,
}

impl InMemoryProvider {
    pub fn new(catalog: Catalog, interactions: Vec<Interaction>) -> Self {
        Self {
            catalog,
            interactions,
        }
    }
}

impl DataProvider for InMemoryProvider {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn load_interactions(&self) -> Result<Vec<Interaction>> {
        Ok(self.interactions.clone())
    }
}
