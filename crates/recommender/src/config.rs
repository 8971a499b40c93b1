//! Engine configuration.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use sources::{DEFAULT_ALPHA, DEFAULT_MAX_FEATURES};

/// Tunables shared by every call an engine serves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight of the collaborative signal, in [0, 1]
    pub alpha: f64,
    /// Recommendation list length
    pub top_n: usize,
    /// Search result list length
    pub search_top_n: usize,
    /// Vocabulary cap for the text vector space
    pub max_features: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            top_n: 10,
            search_top_n: 20,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl EngineConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_search_top_n(mut self, search_top_n: usize) -> Self {
        self.search_top_n = search_top_n;
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        if self.max_features == 0 {
            return Err(EngineError::InvalidConfig(
                "max_features must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Alpha must be a finite value within [0, 1]
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "alpha must be within [0, 1], got {alpha}"
        )))
    }
}
