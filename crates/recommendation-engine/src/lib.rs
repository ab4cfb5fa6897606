//! Recommendation Engine
//!
//! Multi-signal scoring and diversity-aware re-ranking of prediction markets
//! against a user's interest profile. Two engine generations share the
//! [`Recommender`] trait: [`ClassicEngine`] (five fixed-weight signals, plain
//! relevance ordering) and [`DiscoveryEngine`] (seven configurable signals,
//! learned profile weights, viral context, MMR diversification).
//!
//! Everything here is pure computation over caller-supplied inputs; fetching
//! markets, analyses and viral context is the surrounding service's job.

pub mod classic;
pub mod engine;
pub mod mmr;
pub mod risk;
pub mod scorers;
pub mod similarity;
pub mod trending;
pub mod weights;

pub use classic::ClassicEngine;
pub use engine::{DiscoveryEngine, Recommender};
pub use mmr::rerank;
pub use risk::market_risk_bucket;
pub use similarity::{cosine, market_similarity, similar_markets};
pub use trending::trending_markets;
pub use weights::{Weights, WEIGHTS_ENV};
