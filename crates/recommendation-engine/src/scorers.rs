//! Signal scorers.
//!
//! Seven independent, pure scoring functions, each mapping
//! (market, profile, optional analysis, optional context) to a score in
//! [0, 100]. Missing optional input resolves to the neutral 50.0 unless a
//! stated minimum-threshold gate applies; the gates return 0 for that signal
//! only, never reject the market.

use discovery_core::{Market, MarketAnalysis, Sentiment};
use preference_learner::UserProfile;
use std::collections::{BTreeSet, HashMap};

use crate::risk::market_risk_bucket;
use crate::similarity::cosine;

const NEUTRAL: f64 = 50.0;

/// Semantic similarity between the user's interests and the market.
///
/// With both embeddings present, maps cosine [-1, 1] onto [0, 100].
/// Otherwise falls back to Jaccard overlap between the market's detected
/// tags and the user's stated categories.
pub fn semantic_score(
    market: &Market,
    profile: &UserProfile,
    analysis: Option<&MarketAnalysis>,
) -> f64 {
    if let (Some(user_emb), Some(market_emb)) = (
        profile.interest_embedding.as_deref(),
        analysis.and_then(|a| a.embedding.as_deref()),
    ) {
        return (cosine(user_emb, market_emb) + 1.0) * 50.0;
    }

    let market_tags = interest_taxonomy::detect(&market.content_text());
    let user_tags: BTreeSet<&str> = profile.categories.iter().map(|c| c.as_str()).collect();
    if market_tags.is_empty() || user_tags.is_empty() {
        return NEUTRAL;
    }

    interest_taxonomy::jaccard(&market_tags, &user_tags) * 100.0
}

/// Keyword category match against the user's stated interests, boosted by
/// the learned per-category weights. Half the score is the raw match ratio,
/// half the weighted ratio.
pub fn category_score(market: &Market, profile: &UserProfile) -> f64 {
    if profile.categories.is_empty() {
        return NEUTRAL;
    }

    let text = market.search_text();
    let mut matches = 0usize;
    let mut weighted = 0.0;

    for user_category in &profile.categories {
        let tag = user_category.to_lowercase();
        if let Some(keywords) = interest_taxonomy::keywords_for(&tag) {
            if keywords.iter().any(|keyword| text.contains(keyword)) {
                matches += 1;
                weighted += profile.category_weight(&tag);
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let total = profile.categories.len() as f64;
    let base = ((matches as f64 / total) * 100.0).min(100.0);
    let boost = ((weighted / total) * 100.0).min(100.0);
    base * 0.5 + boost * 0.5
}

/// Alignment between the market's risk bucket and the user's effective risk
/// tolerance, scored by distance on the ordered safe < medium < degen scale.
pub fn risk_score(market: &Market, profile: &UserProfile, analysis: Option<&MarketAnalysis>) -> f64 {
    let user = profile.effective_risk_tolerance();
    let market_bucket = market_risk_bucket(market, analysis);

    match user.distance(market_bucket) {
        0 => 100.0,
        1 => 60.0,
        _ => 20.0,
    }
}

/// Trend/viral signal: additive boosts for volume momentum, trader activity,
/// price movement, social buzz, and a viral-context keyword hit. Capped at
/// 100.
pub fn trend_score(
    market: &Market,
    analysis: Option<&MarketAnalysis>,
    context: &HashMap<String, f64>,
) -> f64 {
    let mut score = 0.0;

    // volume momentum: normalized daily rate vs the 7-day average
    if let (Some(vol_24h), Some(vol_7d)) = (market.volume_24h, market.volume_7d) {
        if vol_7d > 0.0 {
            let momentum = vol_24h * 7.0 / vol_7d;
            if momentum > 1.5 {
                score += 30.0;
            } else if momentum > 1.0 {
                score += 15.0;
            }
        }
    }

    if let Some(traders) = market.traders_24h {
        if traders > 100 {
            score += 20.0;
        } else if traders > 50 {
            score += 10.0;
        }
    }

    if let Some(change) = market.price_change_24h {
        let change = change.abs();
        if change > 0.15 {
            score += 20.0;
        } else if change > 0.05 {
            score += 10.0;
        }
    }

    if let Some(buzz) = analysis.and_then(|a| a.social_buzz) {
        score += buzz * 15.0;
    }

    if let Some(weight) = best_context_match(&market.content_text(), context) {
        score += weight * 15.0;
    }

    score.min(100.0)
}

/// Strongest viral-context token appearing in the text. At most one token
/// contributes; ties on weight break toward the lexicographically smaller
/// token so the result is deterministic.
pub(crate) fn best_context_match(text: &str, context: &HashMap<String, f64>) -> Option<f64> {
    let mut best: Option<(&str, f64)> = None;
    for (token, weight) in context {
        if !text.contains(&token.to_lowercase()) {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_token, best_weight)) => {
                *weight > best_weight || (*weight == best_weight && token.as_str() < best_token)
            }
        };
        if better {
            best = Some((token.as_str(), *weight));
        }
    }
    best.map(|(_, weight)| weight)
}

pub(crate) fn volume_tier(volume: f64) -> f64 {
    if volume >= 1_000_000.0 {
        100.0
    } else if volume >= 500_000.0 {
        85.0
    } else if volume >= 100_000.0 {
        70.0
    } else if volume >= 50_000.0 {
        55.0
    } else if volume >= 10_000.0 {
        40.0
    } else {
        25.0
    }
}

fn liquidity_tier(liquidity: f64) -> f64 {
    if liquidity >= 500_000.0 {
        100.0
    } else if liquidity >= 100_000.0 {
        80.0
    } else if liquidity >= 50_000.0 {
        60.0
    } else if liquidity >= 10_000.0 {
        40.0
    } else {
        20.0
    }
}

/// Absolute volume tier (60%) blended with liquidity tier (40%).
/// Returns 0 when the market falls below the user's volume floor.
pub fn volume_score(market: &Market, profile: &UserProfile) -> f64 {
    if market.volume < profile.min_volume {
        return 0.0;
    }
    volume_tier(market.volume) * 0.6 + liquidity_tier(market.liquidity) * 0.4
}

/// Analyzer confidence scaled onto [0, 100]. Returns 0 below the user's
/// confidence floor; neutral 50 with no analysis at all.
pub fn confidence_score(analysis: Option<&MarketAnalysis>, profile: &UserProfile) -> f64 {
    let Some(analysis) = analysis else {
        return NEUTRAL;
    };
    let confidence = analysis.confidence.unwrap_or(0.5);
    if confidence < profile.min_confidence {
        return 0.0;
    }
    confidence * 100.0
}

/// Match between the market's sentiment and the user's stated preference.
/// Neutral 50 when the user has no preference or there is no analysis.
pub fn sentiment_score(analysis: Option<&MarketAnalysis>, profile: &UserProfile) -> f64 {
    let Some(preference) = profile.sentiment_preference else {
        return NEUTRAL;
    };
    let Some(analysis) = analysis else {
        return NEUTRAL;
    };

    let sentiment = analysis.sentiment.unwrap_or(Sentiment::Neutral);
    if sentiment == preference {
        100.0
    } else if sentiment == Sentiment::Neutral {
        60.0
    } else {
        30.0
    }
}
