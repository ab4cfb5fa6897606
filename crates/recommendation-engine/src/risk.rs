use discovery_core::{Market, MarketAnalysis, RiskBucket};

/// Bucket a market by the spread between its implied probabilities.
/// A wide spread (80/20 or more) means the crowd has settled; near-even odds
/// are a coin flip.
pub(crate) fn odds_bucket(spread: f64) -> RiskBucket {
    if spread > 0.6 {
        RiskBucket::Safe
    } else if spread > 0.3 {
        RiskBucket::Medium
    } else {
        RiskBucket::Degen
    }
}

fn volatility_bucket(volatility: f64) -> RiskBucket {
    if volatility < 0.2 {
        RiskBucket::Safe
    } else if volatility < 0.5 {
        RiskBucket::Medium
    } else {
        RiskBucket::Degen
    }
}

fn liquidity_bucket(liquidity: f64) -> RiskBucket {
    if liquidity > 100_000.0 {
        RiskBucket::Safe
    } else if liquidity > 10_000.0 {
        RiskBucket::Medium
    } else {
        RiskBucket::Degen
    }
}

/// Classify a market's risk bucket by majority vote across up to four
/// signals: the analyst risk rating, the odds spread, expected volatility,
/// and the liquidity tier. An explicit categorical label from the analyzer
/// short-circuits the vote. A vote without a unique winner resolves to
/// Medium.
pub fn market_risk_bucket(market: &Market, analysis: Option<&MarketAnalysis>) -> RiskBucket {
    let mut signals: Vec<RiskBucket> = Vec::with_capacity(4);

    if let Some(rating) = analysis.and_then(|a| a.risk) {
        if rating.is_categorical() {
            return rating.bucket();
        }
        signals.push(rating.bucket());
    }

    signals.push(odds_bucket(market.odds_spread()));

    if let Some(volatility) = analysis.and_then(|a| a.volatility) {
        signals.push(volatility_bucket(volatility));
    }

    signals.push(liquidity_bucket(market.liquidity));

    majority_vote(&signals)
}

fn majority_vote(signals: &[RiskBucket]) -> RiskBucket {
    let buckets = [RiskBucket::Safe, RiskBucket::Medium, RiskBucket::Degen];
    let mut counts = [0usize; 3];
    for signal in signals {
        counts[signal.ordinal() as usize] += 1;
    }

    let max = counts.iter().copied().fold(0, usize::max);
    let mut winner = None;
    for bucket in buckets {
        if counts[bucket.ordinal() as usize] == max {
            match winner {
                None => winner = Some(bucket),
                // second bucket at the same count: no unique majority
                Some(_) => return RiskBucket::Medium,
            }
        }
    }

    winner.unwrap_or(RiskBucket::Medium)
}
