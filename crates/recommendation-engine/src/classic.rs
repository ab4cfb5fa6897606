use discovery_core::{Market, MarketAnalysis, RankedMarket, ScoreBreakdown, TrendingMarket};
use preference_learner::UserProfile;
use std::collections::{BTreeSet, HashMap};

use crate::engine::Recommender;
use crate::risk::odds_bucket;
use crate::scorers;

const CATEGORY_WEIGHT: f64 = 0.40;
const RISK_WEIGHT: f64 = 0.20;
const VOLUME_WEIGHT: f64 = 0.15;
const CONFIDENCE_WEIGHT: f64 = 0.15;
const SENTIMENT_WEIGHT: f64 = 0.10;

/// The first-generation recommender, kept for cohorts that still run on it.
///
/// Five signals under a fixed weighting, no semantic or trend scoring, no
/// learned profile weights, and plain relevance ordering (the diversity
/// lambda is accepted and ignored). Enrichment-dependent signals contribute
/// nothing at all when no analysis exists, rather than a neutral 50.
pub struct ClassicEngine;

impl ClassicEngine {
    pub fn new() -> Self {
        Self
    }

    fn category_score(market: &Market, profile: &UserProfile) -> f64 {
        if profile.categories.is_empty() {
            return 50.0;
        }

        let text = market.search_text();
        let mut matches = 0usize;

        for user_category in &profile.categories {
            let tag = user_category.to_lowercase();
            if let Some(keywords) = interest_taxonomy::keywords_for(&tag) {
                if keywords.iter().any(|keyword| text.contains(keyword)) {
                    matches += 1;
                }
            }
            if interest_taxonomy::platform_category_matches(&tag, &market.category) {
                matches += 1;
            }
        }

        if matches == 0 {
            return 0.0;
        }
        ((matches as f64 / profile.categories.len() as f64) * 100.0).min(100.0)
    }

    fn risk_score(market: &Market, profile: &UserProfile, analysis: Option<&MarketAnalysis>) -> f64 {
        // stated tolerance only; the classic engine predates risk drift
        let user = profile.risk_tolerance;
        let market_bucket = match analysis.and_then(|a| a.risk) {
            Some(rating) => rating.bucket(),
            None => odds_bucket(market.odds_spread()),
        };

        if user == market_bucket {
            100.0
        } else if user == discovery_core::RiskBucket::Medium
            || market_bucket == discovery_core::RiskBucket::Medium
        {
            60.0
        } else {
            20.0
        }
    }

    fn volume_score(market: &Market, profile: &UserProfile) -> f64 {
        if market.volume < profile.min_volume {
            return 0.0;
        }
        scorers::volume_tier(market.volume)
    }
}

impl Default for ClassicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Recommender for ClassicEngine {
    fn score(
        &self,
        market: &Market,
        profile: &UserProfile,
        analysis: Option<&MarketAnalysis>,
        _context: &HashMap<String, f64>,
    ) -> (f64, ScoreBreakdown) {
        let category = Self::category_score(market, profile);
        let risk = Self::risk_score(market, profile, analysis);
        let volume = Self::volume_score(market, profile);

        let mut breakdown = ScoreBreakdown {
            category,
            risk,
            volume,
            ..Default::default()
        };
        let mut total = category * CATEGORY_WEIGHT + risk * RISK_WEIGHT + volume * VOLUME_WEIGHT;

        if analysis.is_some() {
            let confidence = scorers::confidence_score(analysis, profile);
            let sentiment = scorers::sentiment_score(analysis, profile);
            breakdown.confidence = confidence;
            breakdown.sentiment = sentiment;
            total += confidence * CONFIDENCE_WEIGHT + sentiment * SENTIMENT_WEIGHT;
        }

        (total.min(100.0), breakdown)
    }

    fn rank(
        &self,
        markets: &[Market],
        profile: &UserProfile,
        analyses: &HashMap<String, MarketAnalysis>,
        context: &HashMap<String, f64>,
        k: usize,
        _diversity_lambda: f64,
    ) -> Vec<RankedMarket> {
        let mut ranked: Vec<RankedMarket> = markets
            .iter()
            .map(|market| {
                let analysis = analyses.get(&market.id);
                let (score, breakdown) = self.score(market, profile, analysis, context);
                RankedMarket {
                    market: market.clone(),
                    score,
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }

    fn trending(
        &self,
        markets: &[Market],
        limit: usize,
        _context: &HashMap<String, f64>,
    ) -> Vec<TrendingMarket> {
        // raw activity only, no momentum or context boosts
        let mut scored: Vec<TrendingMarket> = markets
            .iter()
            .map(|market| TrendingMarket {
                market: market.clone(),
                trend_score: market.volume + market.liquidity * 0.5,
            })
            .collect();

        scored.sort_by(|a, b| {
            b.trend_score
                .partial_cmp(&a.trend_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        scored
    }

    fn detect_category(&self, text: &str) -> BTreeSet<&'static str> {
        interest_taxonomy::detect_keywords(text)
    }
}
