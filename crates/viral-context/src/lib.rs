//! Viral Context
//!
//! Tracks currently-topical keywords and recurring seasonal events, and
//! resolves them into the keyword -> boost-weight map the trend scorer
//! consumes. The built-in tables are a manual baseline; a production
//! deployment feeds `update_trends` from social/news APIs on a schedule.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use discovery_core::{DiscoveryError, Market, ViralContextProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Env var holding a JSON trend override: `{"worldcup": 1.0, "grammys": 0.8}`.
pub const TRENDS_ENV: &str = "VIRAL_TRENDS";

/// A recurring yearly event window. While the query date falls inside the
/// window, every keyword carries the event's weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalEvent {
    pub name: String,
    pub keywords: Vec<String>,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
    pub weight: f64,
}

impl SeasonalEvent {
    pub fn active_at(&self, now: DateTime<Utc>) -> bool {
        let date = (now.month(), now.day());
        (self.start_month, self.start_day) <= date && date <= (self.end_month, self.end_day)
    }
}

/// Manual trend table merged with seasonal event windows.
#[derive(Debug, Clone)]
pub struct SeasonalViralContext {
    trends: HashMap<String, f64>,
    seasonal: Vec<SeasonalEvent>,
}

impl Default for SeasonalViralContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonalViralContext {
    /// Built-in baseline trends and the standard seasonal calendar.
    pub fn new() -> Self {
        Self {
            trends: default_trends(),
            seasonal: seasonal_calendar(),
        }
    }

    /// No baseline at all; useful when every trend comes from an API.
    pub fn empty() -> Self {
        Self {
            trends: HashMap::new(),
            seasonal: Vec::new(),
        }
    }

    /// Parse a trend table from JSON (`{"token": weight, ...}`), layered on
    /// top of the built-in seasonal calendar.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let trends: HashMap<String, f64> =
            serde_json::from_str(raw).context("viral trend table is not a JSON object")?;
        Ok(Self {
            trends,
            seasonal: seasonal_calendar(),
        })
    }

    /// Trend table from the `VIRAL_TRENDS` env var; absent or malformed
    /// values fall back to the built-in baseline.
    pub fn from_env() -> Self {
        match std::env::var(TRENDS_ENV) {
            Ok(raw) => match Self::from_json(&raw) {
                Ok(context) => context,
                Err(err) => {
                    warn!("malformed {} ({}), using built-in trends", TRENDS_ENV, err);
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }

    /// Resolve the full keyword -> weight map at a point in time: the manual
    /// trend table plus every seasonal event active on that date. Seasonal
    /// weights override same-named manual entries.
    pub fn context_at(&self, now: DateTime<Utc>) -> HashMap<String, f64> {
        let mut context = self.trends.clone();

        for event in &self.seasonal {
            if event.active_at(now) {
                for keyword in &event.keywords {
                    context.insert(keyword.clone(), event.weight);
                }
            }
        }

        context
    }

    /// Merge fresh trend weights, overwriting existing tokens.
    pub fn update_trends(&mut self, new_trends: HashMap<String, f64>) {
        self.trends.extend(new_trends);
    }

    pub fn add_event(&mut self, event: SeasonalEvent) {
        self.seasonal.push(event);
    }

    /// Which viral keywords appear in a market's text, with their weights.
    pub fn detect_keywords(&self, market: &Market, now: DateTime<Utc>) -> HashMap<String, f64> {
        let text = market.content_text();
        self.context_at(now)
            .into_iter()
            .filter(|(keyword, _)| text.contains(&keyword.to_lowercase()))
            .collect()
    }

    /// Single viral score for a market in [0, 1]: the strongest keyword hit,
    /// 0.0 when nothing topical appears.
    pub fn boost_score(&self, market: &Market, now: DateTime<Utc>) -> f64 {
        self.detect_keywords(market, now)
            .values()
            .fold(0.0_f64, |acc, weight| acc.max(*weight))
    }
}

#[async_trait]
impl ViralContextProvider for SeasonalViralContext {
    async fn viral_context(&self) -> Result<HashMap<String, f64>, DiscoveryError> {
        Ok(self.context_at(Utc::now()))
    }
}

fn default_trends() -> HashMap<String, f64> {
    [
        // politics
        ("election", 0.9),
        ("trump", 0.8),
        ("biden", 0.7),
        // crypto
        ("bitcoin", 0.8),
        ("btc", 0.8),
        ("ethereum", 0.7),
        ("crypto", 0.7),
        // tech
        ("ai", 0.9),
        ("chatgpt", 0.8),
        ("openai", 0.7),
        // sports
        ("nfl", 0.5),
        ("nba", 0.6),
        // culture
        ("taylor", 0.7),
        ("drake", 0.6),
        ("netflix", 0.5),
    ]
    .into_iter()
    .map(|(token, weight)| (token.to_string(), weight))
    .collect()
}

fn seasonal_calendar() -> Vec<SeasonalEvent> {
    fn event(
        name: &str,
        keywords: &[&str],
        start: (u32, u32),
        end: (u32, u32),
        weight: f64,
    ) -> SeasonalEvent {
        SeasonalEvent {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            start_month: start.0,
            start_day: start.1,
            end_month: end.0,
            end_day: end.1,
            weight,
        }
    }

    vec![
        event(
            "Super Bowl",
            &["superbowl", "super bowl", "nfl championship"],
            (2, 1),
            (2, 15),
            1.0,
        ),
        event(
            "March Madness",
            &["march madness", "ncaa tournament", "college basketball"],
            (3, 15),
            (4, 10),
            0.9,
        ),
        event(
            "NBA Playoffs",
            &["nba playoffs", "nba finals"],
            (4, 15),
            (6, 30),
            0.8,
        ),
        event("Grammys", &["grammys", "grammy awards"], (1, 25), (2, 10), 0.9),
        event("Oscars", &["oscars", "academy awards"], (2, 20), (3, 15), 0.9),
        event(
            "Election Season",
            &["election", "vote", "polls", "debate"],
            (9, 1),
            (11, 10),
            1.0,
        ),
        event(
            "Bitcoin Halving",
            &["halving", "bitcoin halving"],
            (4, 1),
            (5, 1),
            0.9,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 12, 0, 0).unwrap()
    }

    fn market(title: &str) -> Market {
        Market {
            id: "m1".to_string(),
            title: title.to_string(),
            description: String::new(),
            category: String::new(),
            volume: 0.0,
            liquidity: 0.0,
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
    fn baseline_trends_always_present() {
        let context = SeasonalViralContext::new().context_at(at(7, 1));
        assert!(context.contains_key("bitcoin"));
        assert!(context.contains_key("ai"));
    }

    #[test]
    fn seasonal_events_only_inside_their_window() {
        let provider = SeasonalViralContext::new();

        let feb = provider.context_at(at(2, 5));
        assert_eq!(feb.get("superbowl"), Some(&1.0));

        let july = provider.context_at(at(7, 1));
        assert!(july.get("superbowl").is_none());
    }

    #[test]
    fn seasonal_weight_overrides_manual_entry() {
        // "election" is 0.9 in the manual table, 1.0 during election season
        let provider = SeasonalViralContext::new();
        assert_eq!(provider.context_at(at(10, 1)).get("election"), Some(&1.0));
        assert_eq!(provider.context_at(at(5, 1)).get("election"), Some(&0.9));
    }

    #[test]
    fn detects_keywords_in_market_text() {
        let provider = SeasonalViralContext::new();
        let m = market("Will Bitcoin hit $100K before the election?");

        let detected = provider.detect_keywords(&m, at(7, 1));
        assert!(detected.contains_key("bitcoin"));
        assert!(detected.contains_key("election"));
        assert!(!detected.contains_key("nba"));
    }

    #[test]
    fn boost_score_is_strongest_hit() {
        let provider = SeasonalViralContext::new();
        assert_eq!(
            provider.boost_score(&market("Grammys night: who wins?"), at(2, 1)),
            0.9
        );
        assert_eq!(
            provider.boost_score(&market("Completely unrelated topic"), at(2, 1)),
            0.0
        );
    }

    #[test]
    fn update_trends_overwrites_tokens() {
        let mut provider = SeasonalViralContext::empty();
        provider.update_trends(HashMap::from([("worldcup".to_string(), 1.0)]));
        provider.update_trends(HashMap::from([("worldcup".to_string(), 0.4)]));
        assert_eq!(provider.context_at(at(7, 1)).get("worldcup"), Some(&0.4));
    }

    #[test]
    fn custom_events_join_the_calendar() {
        let mut provider = SeasonalViralContext::empty();
        provider.add_event(SeasonalEvent {
            name: "Eurovision".to_string(),
            keywords: vec!["eurovision".to_string()],
            start_month: 5,
            start_day: 1,
            end_month: 5,
            end_day: 20,
            weight: 0.8,
        });

        assert_eq!(provider.context_at(at(5, 10)).get("eurovision"), Some(&0.8));
        assert!(provider.context_at(at(6, 10)).get("eurovision").is_none());
    }

    #[test]
    fn from_json_accepts_a_trend_table() {
        let provider = SeasonalViralContext::from_json(r#"{"worldcup": 1.0}"#).unwrap();
        assert_eq!(provider.context_at(at(7, 1)).get("worldcup"), Some(&1.0));
        assert!(SeasonalViralContext::from_json("not json").is_err());
    }

    #[tokio::test]
    async fn provider_trait_resolves_current_context() {
        let provider = SeasonalViralContext::new();
        let context = ViralContextProvider::viral_context(&provider)
            .await
            .unwrap();
        assert!(context.contains_key("bitcoin"));
    }
}
