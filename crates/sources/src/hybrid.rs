//! Hybrid blending of the collaborative and content signals.

use crate::ScoreVector;
use tracing::debug;

/// Default weight of the collaborative signal
pub const DEFAULT_ALPHA: f64 = 0.6;

/// Which signal the final scores were derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBasis {
    /// alpha-weighted mix of collaborative and content scores
    Hybrid,
    /// both signals were empty; catalog popularity was used instead
    Popularity,
}

/// Blended scores plus the basis they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Blended {
    pub scores: ScoreVector,
    pub basis: ScoreBasis,
}

/// Mixes two aligned score vectors with a fixed weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridBlender {
    alpha: f64,
}

impl Default for HybridBlender {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl HybridBlender {
    /// `alpha` weights the collaborative signal; content gets `1 - alpha`.
    /// Callers validate the range.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `alpha * collab + (1 - alpha) * content`, or `popularity()` when both
    /// signals sum to zero. `popularity` is only evaluated in that case.
    pub fn blend<F>(&self, collab: &ScoreVector, content: &ScoreVector, popularity: F) -> Blended
    where
        F: FnOnce() -> ScoreVector,
    {
        if collab.sum() == 0.0 && content.sum() == 0.0 {
            debug!("Both signals empty; falling back to popularity");
            return Blended {
                scores: popularity(),
                basis: ScoreBasis::Popularity,
            };
        }

        let scores = collab * self.alpha + content * (1.0 - self.alpha);
        Blended {
            scores,
            basis: ScoreBasis::Hybrid,
        }
    }
}
