use chrono::{DateTime, Utc};
use discovery_core::{RiskBucket, Sentiment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How strongly category weight reacts to one unit of engagement.
const CATEGORY_LEARNING_RATE: f64 = 0.1;
/// How strongly risk drift reacts to one unit of engagement.
const RISK_LEARNING_RATE: f64 = 0.05;
/// Learned category multipliers stay inside this band.
const CATEGORY_WEIGHT_MAX: f64 = 2.0;

/// User interaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Click,
    Commit,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Click => "click",
            InteractionKind::Commit => "commit",
        }
    }
}

fn default_engagement() -> f64 {
    1.0
}

/// One user interaction with a market. Events are append-only: once recorded
/// they are never mutated or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub market_id: String,
    pub action: InteractionKind,
    pub category: String,
    pub risk: RiskBucket,
    pub timestamp: DateTime<Utc>,
    /// Engagement strength, >= 0. A quick view is ~1.0; longer dwell or a
    /// committed position scores higher.
    #[serde(default = "default_engagement")]
    pub engagement: f64,
}

impl InteractionEvent {
    pub fn new(
        market_id: impl Into<String>,
        action: InteractionKind,
        category: impl Into<String>,
        risk: RiskBucket,
    ) -> Self {
        Self {
            market_id: market_id.into(),
            action,
            category: category.into(),
            risk,
            timestamp: Utc::now(),
            engagement: 1.0,
        }
    }

    pub fn with_engagement(mut self, engagement: f64) -> Self {
        self.engagement = engagement.max(0.0);
        self
    }
}

/// Preferred resolution horizon for markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    Short,
    Balanced,
    Long,
}

impl Default for TimeHorizon {
    fn default() -> Self {
        TimeHorizon::Balanced
    }
}

/// User profile: stated preferences plus weights learned from interactions.
///
/// The profile is the only long-lived state in the ranking system. Callers
/// own persistence; concurrent learning against the same profile must be
/// serialized (see [`crate::ProfileStore`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    /// Stated interest tags
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: RiskBucket,
    /// Learned per-category multipliers, each in [0, 2]
    #[serde(default)]
    pub category_weights: HashMap<String, f64>,
    /// Accumulated risk drift in [-1, 1]
    #[serde(default)]
    pub risk_adjustment: f64,
    #[serde(default)]
    pub history: Vec<InteractionEvent>,
    /// Semantic embedding of the user's interests
    #[serde(default)]
    pub interest_embedding: Option<Vec<f64>>,
    #[serde(default)]
    pub min_volume: f64,
    #[serde(default)]
    pub min_confidence: f64,
    #[serde(default)]
    pub sentiment_preference: Option<Sentiment>,
    #[serde(default)]
    pub time_horizon: TimeHorizon,
}

fn default_risk_tolerance() -> RiskBucket {
    RiskBucket::Medium
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new("anonymous")
    }
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            categories: Vec::new(),
            risk_tolerance: RiskBucket::Medium,
            category_weights: HashMap::new(),
            risk_adjustment: 0.0,
            history: Vec::new(),
            interest_embedding: None,
            min_volume: 0.0,
            min_confidence: 0.0,
            sentiment_preference: None,
            time_horizon: TimeHorizon::Balanced,
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_risk_tolerance(mut self, risk_tolerance: RiskBucket) -> Self {
        self.risk_tolerance = risk_tolerance;
        self
    }

    pub fn with_min_volume(mut self, min_volume: f64) -> Self {
        self.min_volume = min_volume;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_sentiment_preference(mut self, sentiment: Sentiment) -> Self {
        self.sentiment_preference = Some(sentiment);
        self
    }

    pub fn with_interest_embedding(mut self, embedding: Vec<f64>) -> Self {
        self.interest_embedding = Some(embedding);
        self
    }

    /// Learned multiplier for a category, 1.0 when never interacted with.
    pub fn category_weight(&self, category: &str) -> f64 {
        self.category_weights.get(category).copied().unwrap_or(1.0)
    }

    /// Fold one interaction into the profile: append it to history, bump the
    /// category weight, and nudge the risk drift toward the event's bucket.
    pub fn record_interaction(&mut self, event: InteractionEvent) {
        if !event.category.is_empty() {
            let current = self.category_weight(&event.category);
            let bumped =
                (current + CATEGORY_LEARNING_RATE * event.engagement).min(CATEGORY_WEIGHT_MAX);
            self.category_weights.insert(event.category.clone(), bumped);
        }

        let nudge = event.risk.base_value() * RISK_LEARNING_RATE * event.engagement;
        self.risk_adjustment = (self.risk_adjustment + nudge).clamp(-1.0, 1.0);

        self.history.push(event);
    }

    /// Risk tolerance after accumulated drift, re-bucketed on the
    /// safe < medium < degen scale.
    pub fn effective_risk_tolerance(&self) -> RiskBucket {
        RiskBucket::from_signed(self.risk_tolerance.base_value() + self.risk_adjustment)
    }
}
