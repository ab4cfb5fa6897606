use discovery_core::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Env var holding a JSON weight override, e.g.
/// `{"semantic": 0.4, "category": 0.3}`. Missing fields keep their defaults.
pub const WEIGHTS_ENV: &str = "DISCOVERY_WEIGHTS";

/// Per-signal scoring weights. Normalized to sum to 1.0 before use;
/// typically process-wide configuration, swappable per A/B cohort by
/// constructing engines with different instances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub semantic: f64,
    pub category: f64,
    pub risk: f64,
    pub trend: f64,
    pub volume: f64,
    pub confidence: f64,
    pub sentiment: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            semantic: 0.30,
            category: 0.20,
            risk: 0.15,
            trend: 0.15,
            volume: 0.10,
            confidence: 0.05,
            sentiment: 0.05,
        }
    }
}

impl Weights {
    fn total(&self) -> f64 {
        self.semantic
            + self.category
            + self.risk
            + self.trend
            + self.volume
            + self.confidence
            + self.sentiment
    }

    /// Scale entries so they sum to 1.0. Negative entries floor at zero
    /// first; an all-zero vector falls back to an equal split instead of
    /// dividing by zero. Idempotent.
    pub fn normalize(&mut self) {
        self.semantic = self.semantic.max(0.0);
        self.category = self.category.max(0.0);
        self.risk = self.risk.max(0.0);
        self.trend = self.trend.max(0.0);
        self.volume = self.volume.max(0.0);
        self.confidence = self.confidence.max(0.0);
        self.sentiment = self.sentiment.max(0.0);

        let total = self.total();
        if total <= 0.0 {
            warn!("all-zero weight vector, falling back to equal split");
            let equal = 1.0 / 7.0;
            self.semantic = equal;
            self.category = equal;
            self.risk = equal;
            self.trend = equal;
            self.volume = equal;
            self.confidence = equal;
            self.sentiment = equal;
            return;
        }

        self.semantic /= total;
        self.category /= total;
        self.risk /= total;
        self.trend /= total;
        self.volume /= total;
        self.confidence /= total;
        self.sentiment /= total;
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Weighted sum of the per-signal sub-scores. Bounded inputs under a
    /// normalized vector cannot exceed 100, but clamp anyway.
    pub fn aggregate(&self, breakdown: &ScoreBreakdown) -> f64 {
        let total = self.semantic * breakdown.semantic
            + self.category * breakdown.category
            + self.risk * breakdown.risk
            + self.trend * breakdown.trend
            + self.volume * breakdown.volume
            + self.confidence * breakdown.confidence
            + self.sentiment * breakdown.sentiment;
        total.clamp(0.0, 100.0)
    }

    /// Weights from the `DISCOVERY_WEIGHTS` env var, already normalized.
    /// Absent or malformed JSON falls back to defaults.
    pub fn from_env() -> Self {
        match std::env::var(WEIGHTS_ENV) {
            Ok(raw) => match serde_json::from_str::<Weights>(&raw) {
                Ok(weights) => weights.normalized(),
                Err(err) => {
                    warn!("malformed {} ({}), using default weights", WEIGHTS_ENV, err);
                    Self::default().normalized()
                }
            },
            Err(_) => Self::default().normalized(),
        }
    }
}
