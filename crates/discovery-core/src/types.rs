use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DiscoveryError;

/// A prediction market as delivered by the market-data layer.
///
/// Everything here is read-only input to the ranking engine; the engine never
/// mutates a market. Optional activity fields are absent when the upstream
/// source doesn't track them and degrade to neutral behavior downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Total traded volume in USD
    #[serde(default)]
    pub volume: f64,
    /// Current liquidity in USD
    #[serde(default)]
    pub liquidity: f64,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub volume_7d: Option<f64>,
    #[serde(default)]
    pub traders_24h: Option<u32>,
    /// Signed fractional price move over the last 24h (0.15 = 15%)
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    /// Implied probability of the YES outcome
    #[serde(default)]
    pub odds_yes: Option<f64>,
    /// Implied probability of the NO outcome
    #[serde(default)]
    pub odds_no: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Market {
    /// Category, title and description joined and lower-cased for keyword search.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.category, self.title, self.description).to_lowercase()
    }

    /// Title and description joined and lower-cased (no category label).
    pub fn content_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Absolute spread between the two implied probabilities.
    /// Unknown odds default to an even 0.5/0.5 book.
    pub fn odds_spread(&self) -> f64 {
        let yes = self.odds_yes.unwrap_or(0.5);
        let no = self.odds_no.unwrap_or(0.5);
        (yes - no).abs()
    }

    /// Boundary check run by the request layer before candidates reach the
    /// engine. The engine itself assumes well-formed input.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.id.is_empty() {
            return Err(DiscoveryError::InvalidCandidate(
                "market is missing an id".to_string(),
            ));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(DiscoveryError::InvalidCandidate(format!(
                "market {} has negative or non-finite volume",
                self.id
            )));
        }
        if !self.liquidity.is_finite() || self.liquidity < 0.0 {
            return Err(DiscoveryError::InvalidCandidate(format!(
                "market {} has negative or non-finite liquidity",
                self.id
            )));
        }
        Ok(())
    }
}

/// Validate a whole candidate slice, reporting the first malformed entry.
pub fn validate_candidates(markets: &[Market]) -> Result<(), DiscoveryError> {
    for market in markets {
        market.validate()?;
    }
    Ok(())
}

/// Risk appetite bucket on the ordered safe < medium < degen scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Safe,
    Medium,
    Degen,
}

impl RiskBucket {
    /// Normalize a 1-5 analyst risk level. Out-of-range values clamp to the
    /// nearest bucket.
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=2 => RiskBucket::Safe,
            3 => RiskBucket::Medium,
            _ => RiskBucket::Degen,
        }
    }

    /// Position on the ordered scale (safe=0, medium=1, degen=2).
    pub fn ordinal(&self) -> i8 {
        match self {
            RiskBucket::Safe => 0,
            RiskBucket::Medium => 1,
            RiskBucket::Degen => 2,
        }
    }

    /// Steps between two buckets on the ordered scale.
    pub fn distance(&self, other: RiskBucket) -> u8 {
        (self.ordinal() - other.ordinal()).unsigned_abs()
    }

    /// Signed base value used by the preference-learning drift model.
    pub fn base_value(&self) -> f64 {
        match self {
            RiskBucket::Safe => -0.5,
            RiskBucket::Medium => 0.0,
            RiskBucket::Degen => 0.5,
        }
    }

    /// Re-bucket an adjusted signed value, thresholds at +/-0.25.
    pub fn from_signed(value: f64) -> Self {
        if value < -0.25 {
            RiskBucket::Safe
        } else if value > 0.25 {
            RiskBucket::Degen
        } else {
            RiskBucket::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::Safe => "safe",
            RiskBucket::Medium => "medium",
            RiskBucket::Degen => "degen",
        }
    }
}

/// Risk rating as it arrives from the analysis collaborator. Upstream
/// analyzers emit either a 1-5 integer or a categorical label; both shapes
/// deserialize here and normalize through [`RiskRating::bucket`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskRating {
    Level(u8),
    Label(RiskBucket),
}

impl RiskRating {
    pub fn bucket(&self) -> RiskBucket {
        match self {
            RiskRating::Level(level) => RiskBucket::from_level(*level),
            RiskRating::Label(bucket) => *bucket,
        }
    }

    /// True when the analyzer committed to an explicit categorical label
    /// rather than a numeric estimate.
    pub fn is_categorical(&self) -> bool {
        matches!(self, RiskRating::Label(_))
    }
}

/// Market sentiment from the analysis collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Per-market enrichment computed by the external analysis collaborator.
///
/// Every field is optional; absent fields fall back to neutral defaults in
/// the scorers rather than erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketAnalysis {
    /// Model confidence in its own read of the market, 0-1
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, rename = "risk_level")]
    pub risk: Option<RiskRating>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    /// Expected price volatility, 0-1
    #[serde(default)]
    pub volatility: Option<f64>,
    /// Social media activity estimate, 0-1
    #[serde(default)]
    pub social_buzz: Option<f64>,
    /// Semantic embedding of the market text
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,
}

/// Per-signal sub-scores, each in [0, 100]. Attached to every ranked market
/// for explainability; never persisted by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic: f64,
    pub category: f64,
    pub risk: f64,
    pub trend: f64,
    pub volume: f64,
    pub confidence: f64,
    pub sentiment: f64,
}

/// A market with its final recommendation score and signal breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMarket {
    pub market: Market,
    /// Combined score, 0-100
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A market with its trending score (unbounded, sort key only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingMarket {
    pub market: Market,
    pub trend_score: f64,
}
