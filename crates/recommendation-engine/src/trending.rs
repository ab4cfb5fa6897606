use chrono::{DateTime, Utc};
use discovery_core::{Market, TrendingMarket};
use std::collections::HashMap;

use crate::scorers::best_context_match;

/// Score and rank markets by raw activity: volume plus half the liquidity,
/// multiplied up by volume momentum, recency (exponential decay over 24h),
/// and the strongest viral-context hit.
pub fn trending_markets(
    markets: &[Market],
    limit: usize,
    context: &HashMap<String, f64>,
    now: DateTime<Utc>,
) -> Vec<TrendingMarket> {
    let mut scored: Vec<TrendingMarket> = markets
        .iter()
        .map(|market| {
            let mut score = market.volume + market.liquidity * 0.5;

            if let (Some(vol_24h), Some(vol_7d)) = (market.volume_24h, market.volume_7d) {
                if vol_7d > 0.0 {
                    let momentum = vol_24h * 7.0 / vol_7d;
                    score *= momentum.max(1.0);
                }
            }

            if let Some(updated_at) = market.updated_at {
                let hours_old = (now - updated_at).num_seconds() as f64 / 3600.0;
                score *= 1.0 + (-hours_old / 24.0).exp();
            }

            if let Some(weight) = best_context_match(&market.content_text(), context) {
                score *= 1.0 + weight;
            }

            TrendingMarket {
                market: market.clone(),
                trend_score: score,
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn market(id: &str, title: &str, volume: f64, liquidity: f64) -> Market {
        Market {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: String::new(),
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

    #[test]
    fn base_score_is_volume_plus_half_liquidity() {
        let markets = vec![market("a", "quiet", 100_000.0, 50_000.0)];
        let result = trending_markets(&markets, 10, &HashMap::new(), Utc::now());
        assert!((result[0].trend_score - 125_000.0).abs() < 1e-6);
    }

    #[test]
    fn momentum_multiplies_the_base() {
        let mut hot = market("hot", "busy", 100_000.0, 0.0);
        hot.volume_24h = Some(30_000.0);
        hot.volume_7d = Some(70_000.0); // momentum 3.0

        let markets = vec![hot, market("cold", "idle", 250_000.0, 0.0)];
        let result = trending_markets(&markets, 10, &HashMap::new(), Utc::now());
        assert_eq!(result[0].market.id, "hot");
        assert!((result[0].trend_score - 300_000.0).abs() < 1e-6);
    }

    #[test]
    fn slowing_momentum_never_penalizes() {
        let mut cooling = market("c", "cooling", 100_000.0, 0.0);
        cooling.volume_24h = Some(5_000.0);
        cooling.volume_7d = Some(70_000.0); // daily rate well below average

        let result = trending_markets(&[cooling], 10, &HashMap::new(), Utc::now());
        assert!((result[0].trend_score - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn fresh_markets_outrank_stale_twins() {
        let now = Utc::now();
        let mut fresh = market("fresh", "same", 100_000.0, 0.0);
        fresh.updated_at = Some(now - Duration::hours(1));
        let mut stale = market("stale", "same", 100_000.0, 0.0);
        stale.updated_at = Some(now - Duration::hours(72));

        let result = trending_markets(&[stale, fresh], 10, &HashMap::new(), now);
        assert_eq!(result[0].market.id, "fresh");
    }

    #[test]
    fn context_boost_applies_to_matching_markets() {
        let context = HashMap::from([("election".to_string(), 1.0)]);
        let markets = vec![
            market("e", "Election night special", 100_000.0, 0.0),
            market("q", "Quiet market", 150_000.0, 0.0),
        ];

        let result = trending_markets(&markets, 10, &context, Utc::now());
        // 100K * (1 + 1.0) = 200K beats 150K
        assert_eq!(result[0].market.id, "e");
    }

    #[test]
    fn limit_truncates() {
        let markets: Vec<Market> = (0..5)
            .map(|i| market(&format!("m{i}"), "t", 1_000.0 * i as f64, 0.0))
            .collect();
        let result = trending_markets(&markets, 2, &HashMap::new(), Utc::now());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].market.id, "m4");
    }
}
