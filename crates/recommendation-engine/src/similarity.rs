use discovery_core::Market;

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Fails soft: mismatched lengths and zero-norm vectors return 0.0.
/// Embeddings are optional enrichment, so a malformed or missing vector
/// degrades the score contribution instead of aborting the ranking.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Pairwise market similarity used for diversity: platform category equality
/// weighted 0.5 plus Jaccard overlap of detected interest tags weighted 0.5.
/// Embeddings are deliberately not consulted here; diversity stays lexical.
pub fn market_similarity(a: &Market, b: &Market) -> f64 {
    let category_match = if a.category.eq_ignore_ascii_case(&b.category) {
        1.0
    } else {
        0.0
    };

    let tags_a = interest_taxonomy::detect(&a.content_text());
    let tags_b = interest_taxonomy::detect(&b.content_text());
    let overlap = if tags_a.is_empty() || tags_b.is_empty() {
        0.0
    } else {
        interest_taxonomy::jaccard(&tags_a, &tags_b)
    };

    category_match * 0.5 + overlap * 0.5
}

/// Markets most similar to a probe market, descending. The probe itself is
/// excluded by id and zero-similarity markets are dropped.
pub fn similar_markets(probe: &Market, pool: &[Market], limit: usize) -> Vec<(Market, f64)> {
    let mut similar: Vec<(Market, f64)> = pool
        .iter()
        .filter(|other| other.id != probe.id)
        .map(|other| (other.clone(), market_similarity(probe, other)))
        .filter(|(_, similarity)| *similarity > 0.0)
        .collect();

    similar.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    similar.truncate(limit);
    similar
}
