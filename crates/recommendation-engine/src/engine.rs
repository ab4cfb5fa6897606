use chrono::Utc;
use discovery_core::{Market, MarketAnalysis, RankedMarket, ScoreBreakdown, TrendingMarket};
use preference_learner::UserProfile;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::{mmr, scorers, similarity, trending, weights::Weights};

/// Capability surface of a market recommender. Both engine generations
/// implement it; callers pick a variant by constructing it (or holding a
/// `dyn Recommender`), never through process-wide state.
pub trait Recommender: Send + Sync {
    /// Score one market against a profile, returning the combined score and
    /// its per-signal breakdown.
    fn score(
        &self,
        market: &Market,
        profile: &UserProfile,
        analysis: Option<&MarketAnalysis>,
        context: &HashMap<String, f64>,
    ) -> (f64, ScoreBreakdown);

    /// Rank candidates for a user. `analyses` is keyed by market id;
    /// `context` maps viral keywords to boost weights. Returns at most `k`
    /// rows in final display order.
    fn rank(
        &self,
        markets: &[Market],
        profile: &UserProfile,
        analyses: &HashMap<String, MarketAnalysis>,
        context: &HashMap<String, f64>,
        k: usize,
        diversity_lambda: f64,
    ) -> Vec<RankedMarket>;

    /// Markets ranked by raw activity, independent of any user.
    fn trending(
        &self,
        markets: &[Market],
        limit: usize,
        context: &HashMap<String, f64>,
    ) -> Vec<TrendingMarket>;

    /// Interest tags detected in free text.
    fn detect_category(&self, text: &str) -> BTreeSet<&'static str>;
}

/// The current-generation recommender: seven weighted signals, learned
/// profile weights, viral context, and MMR diversification.
pub struct DiscoveryEngine {
    weights: Weights,
}

impl DiscoveryEngine {
    pub fn new() -> Self {
        Self::with_weights(Weights::default())
    }

    /// Build an engine with an explicit weight vector (normalized on entry).
    /// This is the A/B seam: construct one engine per cohort.
    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights: weights.normalized(),
        }
    }

    /// Weights from `DISCOVERY_WEIGHTS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::with_weights(Weights::from_env())
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Markets most similar to a probe, using the same pairwise similarity
    /// as the diversity pass.
    pub fn similar_markets(
        &self,
        probe: &Market,
        pool: &[Market],
        limit: usize,
    ) -> Vec<(Market, f64)> {
        similarity::similar_markets(probe, pool, limit)
    }
}

impl Default for DiscoveryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Recommender for DiscoveryEngine {
    fn score(
        &self,
        market: &Market,
        profile: &UserProfile,
        analysis: Option<&MarketAnalysis>,
        context: &HashMap<String, f64>,
    ) -> (f64, ScoreBreakdown) {
        let breakdown = ScoreBreakdown {
            semantic: scorers::semantic_score(market, profile, analysis),
            category: scorers::category_score(market, profile),
            risk: scorers::risk_score(market, profile, analysis),
            trend: scorers::trend_score(market, analysis, context),
            volume: scorers::volume_score(market, profile),
            confidence: scorers::confidence_score(analysis, profile),
            sentiment: scorers::sentiment_score(analysis, profile),
        };

        (self.weights.aggregate(&breakdown), breakdown)
    }

    fn rank(
        &self,
        markets: &[Market],
        profile: &UserProfile,
        analyses: &HashMap<String, MarketAnalysis>,
        context: &HashMap<String, f64>,
        k: usize,
        diversity_lambda: f64,
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

        debug!(
            user_id = %profile.user_id,
            candidates = ranked.len(),
            k,
            diversity_lambda,
            "scored candidates"
        );

        if diversity_lambda < 1.0 && ranked.len() > k {
            mmr::rerank(ranked, k, diversity_lambda)
        } else {
            ranked.truncate(k);
            ranked
        }
    }

    fn trending(
        &self,
        markets: &[Market],
        limit: usize,
        context: &HashMap<String, f64>,
    ) -> Vec<TrendingMarket> {
        trending::trending_markets(markets, limit, context, Utc::now())
    }

    fn detect_category(&self, text: &str) -> BTreeSet<&'static str> {
        interest_taxonomy::detect(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_core::RiskBucket;

    fn market(id: &str, title: &str, category: &str, volume: f64, liquidity: f64) -> Market {
        Market {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            volume,
            liquidity,
            volume_24h: None,
            volume_7d: None,
            traders_24h: None,
            price_change_24h: None,
            odds_yes: None,
            odds_no: None,
            updated_at: None,
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new("u1")
            .with_categories(vec!["crypto".to_string()])
            .with_risk_tolerance(RiskBucket::Medium)
            .with_min_volume(10_000.0)
    }

    #[test]
    fn empty_candidate_list_ranks_to_empty() {
        let engine = DiscoveryEngine::new();
        let result = engine.rank(
            &[],
            &profile(),
            &HashMap::new(),
            &HashMap::new(),
            10,
            0.7,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn rank_orders_by_relevance_and_attaches_breakdowns() {
        let engine = DiscoveryEngine::new();
        let markets = vec![
            market("sports", "Will the Jets make the playoffs?", "Sports", 20_000.0, 5_000.0),
            market("btc", "Will Bitcoin hit $100K?", "Crypto", 250_000.0, 150_000.0),
        ];

        let result = engine.rank(
            &markets,
            &profile(),
            &HashMap::new(),
            &HashMap::new(),
            10,
            1.0,
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].market.id, "btc");
        assert!(result[0].score > result[1].score);
        // breakdown carries the category signal that drove the ordering
        assert!(result[0].breakdown.category > result[1].breakdown.category);
        assert!(result.iter().all(|r| r.score >= 0.0 && r.score <= 100.0));
    }

    #[test]
    fn k_larger_than_pool_returns_everything() {
        let engine = DiscoveryEngine::new();
        let markets = vec![
            market("a", "Will Bitcoin hit $100K?", "Crypto", 50_000.0, 10_000.0),
            market("b", "Will Ethereum hit $10K?", "Crypto", 60_000.0, 10_000.0),
        ];
        let result = engine.rank(
            &markets,
            &profile(),
            &HashMap::new(),
            &HashMap::new(),
            50,
            0.7,
        );
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn diversity_pass_only_runs_when_pool_exceeds_k() {
        let engine = DiscoveryEngine::new();
        let markets = vec![
            market("c1", "Will Bitcoin hit $100K?", "Crypto", 900_000.0, 400_000.0),
            market("c2", "Will Ethereum hit $10K?", "Crypto", 800_000.0, 300_000.0),
            market("c3", "Will Solana flip Ethereum?", "Crypto", 700_000.0, 250_000.0),
            market("s1", "Will the Chiefs win the Superbowl?", "Sports", 600_000.0, 200_000.0),
        ];

        let diversified = engine.rank(
            &markets,
            &profile(),
            &HashMap::new(),
            &HashMap::new(),
            2,
            0.2,
        );
        assert_eq!(diversified.len(), 2);
        // a heavy diversity preference pulls the sports market into the cut
        assert!(diversified.iter().any(|r| r.market.id == "s1"));
    }

    #[test]
    fn enrichment_shifts_scores() {
        let engine = DiscoveryEngine::new();
        let markets = vec![market(
            "btc",
            "Will Bitcoin hit $100K?",
            "Crypto",
            250_000.0,
            150_000.0,
        )];

        let plain = engine.rank(
            &markets,
            &profile(),
            &HashMap::new(),
            &HashMap::new(),
            1,
            1.0,
        );

        let analyses = HashMap::from([(
            "btc".to_string(),
            MarketAnalysis {
                confidence: Some(0.95),
                social_buzz: Some(1.0),
                ..Default::default()
            },
        )]);
        let enriched = engine.rank(
            &markets,
            &profile(),
            &analyses,
            &HashMap::new(),
            1,
            1.0,
        );

        assert!(enriched[0].score > plain[0].score);
        assert!(enriched[0].breakdown.confidence > plain[0].breakdown.confidence);
    }

    #[test]
    fn custom_weights_change_the_mix() {
        let trend_heavy = DiscoveryEngine::with_weights(Weights {
            semantic: 0.0,
            category: 0.0,
            risk: 0.0,
            trend: 1.0,
            volume: 0.0,
            confidence: 0.0,
            sentiment: 0.0,
        });

        let mut hot = market("hot", "Quiet title", "Other", 20_000.0, 5_000.0);
        hot.traders_24h = Some(500);
        hot.price_change_24h = Some(0.3);

        let (score, breakdown) =
            trend_heavy.score(&hot, &profile(), None, &HashMap::new());
        assert_eq!(score, breakdown.trend);
        assert!((breakdown.trend - 40.0).abs() < 1e-9);
    }

    #[test]
    fn detect_category_includes_slang() {
        let engine = DiscoveryEngine::new();
        let tags = engine.detect_category("that takeover bid is bussin");
        assert!(tags.contains("culture"));
    }
}
