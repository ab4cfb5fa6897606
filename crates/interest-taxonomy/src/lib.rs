//! Interest Taxonomy
//!
//! Maps free market text to a fixed set of interest tags via keyword
//! membership. Detection is pure string work: lower-case the text, test
//! literal substring membership per tag, short-circuit on the first keyword
//! hit for each tag.

use std::collections::BTreeSet;

/// Keyword lexicon per interest tag. A tag matches a text when any of its
/// keywords appears as a substring of the lower-cased text.
pub const INTEREST_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "politics",
        &[
            "election", "trump", "biden", "congress", "president", "vote", "democracy",
            "senate", "polls", "debate", "campaign", "governor", "mayor", "republican",
            "democrat",
        ],
    ),
    (
        "crypto",
        &[
            "bitcoin", "ethereum", "nft", "defi", "web3", "crypto", "blockchain",
            "btc", "eth", "solana", "binance", "coinbase", "wallet", "dex", "dao",
            "token", "coin", "mining", "hodl", "moon", "lambo",
        ],
    ),
    (
        "tech",
        &[
            "ai", "startup", "tesla", "apple", "meta", "google", "tech", "openai",
            "chatgpt", "robot", "drone", "space", "spacex", "elon", "innovation",
            "software", "app", "platform", "gadget", "iphone", "android",
        ],
    ),
    (
        "sports",
        &[
            "nfl", "nba", "fifa", "soccer", "football", "basketball", "sports",
            "championship", "playoffs", "superbowl", "worldcup", "olympics",
            "lebron", "curry", "mahomes", "messi", "ronaldo", "athlete",
        ],
    ),
    (
        "culture",
        &[
            "music", "movie", "celebrity", "tiktok", "instagram", "viral", "meme",
            "taylor", "drake", "beyonce", "kardashian", "netflix", "spotify",
            "concert", "festival", "grammy", "oscar", "emmy", "influencer",
            "cancelled", "ratio", "trending",
        ],
    ),
    (
        "finance",
        &[
            "stock", "market", "economy", "recession", "inflation", "fed",
            "wall street", "nasdaq", "dow", "s&p", "bull", "bear", "invest",
            "portfolio", "nvidia", "microsoft", "amazon", "tesla stock",
        ],
    ),
    (
        "degen",
        &[
            "meme", "yolo", "moon", "pump", "ape", "degen", "longshot",
            "underdog", "upset", "wildcard", "gamble", "bet", "risky",
        ],
    ),
];

/// Informal expressions that signal pop-culture content. Any hit maps to the
/// `culture` tag without separate scoring.
pub const SLANG_TERMS: &[&str] = &[
    "ratio", "no cap", "fr", "bussin", "mid", "goat", "slay", "stan", "vibe",
    "based",
];

/// Platform category label -> interest tags. Used for direct category
/// matching against the label the market source assigns.
pub const PLATFORM_CATEGORY_TAGS: &[(&str, &[&str])] = &[
    ("us-current-affairs", &["politics", "news", "usa", "government"]),
    ("politics", &["politics", "elections", "government"]),
    ("crypto", &["crypto", "web3", "blockchain", "defi"]),
    ("tech", &["tech", "ai", "startup", "innovation"]),
    ("sports", &["sports", "football", "basketball", "soccer"]),
    ("pop culture", &["culture", "entertainment", "music", "movies"]),
    ("entertainment", &["culture", "entertainment", "celebrity"]),
    ("finance", &["finance", "stocks", "economy", "business"]),
    ("science", &["science", "health", "research"]),
    ("other", &["misc", "other"]),
];

/// Keyword list for a tag, if the tag is part of the taxonomy.
pub fn keywords_for(tag: &str) -> Option<&'static [&'static str]> {
    INTEREST_KEYWORDS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, keywords)| *keywords)
}

/// Detect interest tags from keyword hits only. Empty text yields an empty
/// set, never an error.
pub fn detect_keywords(text: &str) -> BTreeSet<&'static str> {
    let text_lower = text.to_lowercase();
    let mut detected = BTreeSet::new();

    for (tag, keywords) in INTEREST_KEYWORDS {
        if keywords.iter().any(|keyword| text_lower.contains(keyword)) {
            detected.insert(*tag);
        }
    }

    detected
}

/// Detect interest tags with slang support: keyword hits plus the informal
/// lexicon, which maps to `culture`.
pub fn detect(text: &str) -> BTreeSet<&'static str> {
    let mut detected = detect_keywords(text);

    let text_lower = text.to_lowercase();
    if SLANG_TERMS.iter().any(|slang| text_lower.contains(slang)) {
        detected.insert("culture");
    }

    detected
}

/// True when a user's interest tag maps onto the platform category label
/// the market source assigned.
pub fn platform_category_matches(user_tag: &str, market_category: &str) -> bool {
    let market_category = market_category.to_lowercase();
    PLATFORM_CATEGORY_TAGS.iter().any(|(label, tags)| {
        tags.contains(&user_tag) && market_category.contains(label)
    })
}

/// Jaccard overlap between two tag sets. Returns 0.0 when the union is empty.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tags_from_keywords() {
        let tags = detect("Will Bitcoin hit $100K before the election?");
        assert!(tags.contains("crypto"));
        assert!(tags.contains("politics"));
    }

    #[test]
    fn empty_text_yields_empty_set() {
        assert!(detect("").is_empty());
        assert!(detect_keywords("").is_empty());
    }

    #[test]
    fn each_tag_appears_at_most_once() {
        // Multiple keyword hits for the same tag collapse into one entry.
        let tags = detect("bitcoin ethereum solana defi");
        assert_eq!(tags.iter().filter(|t| **t == "crypto").count(), 1);
    }

    #[test]
    fn slang_maps_to_culture() {
        let tags = detect("no cap this is bussin");
        assert!(tags.contains("culture"));

        // keyword-only detection ignores slang
        let plain = detect_keywords("no cap this is bussin");
        assert!(!plain.contains("culture"));
    }

    #[test]
    fn platform_category_mapping() {
        assert!(platform_category_matches("web3", "Crypto"));
        assert!(platform_category_matches("entertainment", "Pop Culture"));
        assert!(!platform_category_matches("sports", "Crypto"));
    }

    #[test]
    fn jaccard_overlap() {
        let a: BTreeSet<&str> = ["crypto", "tech"].into_iter().collect();
        let b: BTreeSet<&str> = ["crypto", "sports"].into_iter().collect();
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);

        let empty: BTreeSet<&str> = BTreeSet::new();
        assert_eq!(jaccard(&a, &empty), 0.0);
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }
}
