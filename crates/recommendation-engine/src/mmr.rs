use discovery_core::RankedMarket;
use tracing::debug;

use crate::similarity::market_similarity;

/// Greedy Maximal Marginal Relevance re-ranking.
///
/// `ranked` must already be sorted descending by score. The result seeds
/// with the top item, then repeatedly picks the remaining candidate
/// maximizing `lambda * (score / 100) - (1 - lambda) * max_similarity` to
/// anything already selected, until `k` items are chosen or the pool runs
/// out. `lambda = 1.0` degenerates to the plain relevance top-k;
/// `lambda = 0.0` maximizes diversity after the seed.
///
/// O(k * n) in the pool size; callers should bound the pool before invoking.
pub fn rerank(mut ranked: Vec<RankedMarket>, k: usize, lambda: f64) -> Vec<RankedMarket> {
    if k == 0 || ranked.is_empty() {
        return Vec::new();
    }
    let lambda = lambda.clamp(0.0, 1.0);

    let mut selected = Vec::with_capacity(k.min(ranked.len()));
    selected.push(ranked.remove(0));

    while selected.len() < k && !ranked.is_empty() {
        let mut best_idx = 0;
        let mut best_value = f64::NEG_INFINITY;

        for (idx, candidate) in ranked.iter().enumerate() {
            let relevance = candidate.score / 100.0;
            let max_similarity = selected
                .iter()
                .map(|chosen| market_similarity(&candidate.market, &chosen.market))
                .fold(0.0_f64, f64::max);

            let value = lambda * relevance - (1.0 - lambda) * max_similarity;
            if value > best_value {
                best_value = value;
                best_idx = idx;
            }
        }

        selected.push(ranked.remove(best_idx));
    }

    debug!(selected = selected.len(), lambda, "diversity re-ranking done");
    selected
}
