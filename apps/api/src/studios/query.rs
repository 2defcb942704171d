//! Fuzzy studio search with tiered relevance.
//!
//! Candidates come from the prefix index; each one is then classified by its
//! best match tier and ordered by (score desc, edit distance asc, name length
//! asc). Levenshtein distance is from `strsim`.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::models::studio::NormalizedEntity;
use crate::studios::index::SearchIndex;
use crate::studios::normalizer::split_words;

/// Match tiers, best first. The discriminant is the tier's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    Fuzzy = 30,
    TokenContains = 50,
    NameContains = 60,
    TokenPrefix = 70,
    NamePrefix = 80,
    /// Kept for the tier ladder and wire format. Normalization always adds
    /// the whole lowercased name as a search token, so a query equal to the
    /// name is already `Exact` and this tier is not produced by [`query`].
    NameExact = 90,
    Exact = 100,
}

impl MatchType {
    pub fn score(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    pub name: String,
    pub match_type: MatchType,
    pub score: u32,
    pub distance: usize,
}

/// Edits tolerated by a fuzzy match: one, plus one per five query chars.
pub fn fuzzy_threshold(query_chars: usize) -> usize {
    1 + query_chars / 5
}

/// Ranks `entities` against `q` using `index` for candidate lookup.
///
/// Blank queries and empty indexes return no results.
pub fn query(q: &str, index: &SearchIndex, entities: &[NormalizedEntity]) -> Vec<RankedResult> {
    let q = q.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let by_id: HashMap<&str, &NormalizedEntity> =
        entities.iter().map(|e| (e.id(), e)).collect();

    let mut results: Vec<RankedResult> = index
        .candidates(&q)
        .into_iter()
        .filter_map(|id| by_id.get(id))
        .filter_map(|entity| {
            classify(entity, &q).map(|(match_type, distance)| RankedResult {
                id: entity.id().to_string(),
                name: entity.name().to_string(),
                match_type,
                score: match_type.score(),
                distance,
            })
        })
        .collect();

    results.sort_by(compare_ranked);
    results
}

fn compare_ranked(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.distance.cmp(&b.distance))
        .then(a.name.chars().count().cmp(&b.name.chars().count()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Best `(tier, distance)` for one entity, or `None` if it does not match.
fn classify(entity: &NormalizedEntity, q: &str) -> Option<(MatchType, usize)> {
    let tokens = &entity.normalized.search_tokens;
    let name = entity.name().trim().to_lowercase();

    if tokens.contains(q) {
        return Some((MatchType::Exact, 0));
    }
    if name == q {
        return Some((MatchType::NameExact, 0));
    }
    if name.starts_with(q) {
        return Some((MatchType::NamePrefix, 0));
    }
    if let Some(distance) = min_distance(q, tokens.iter().filter(|t| t.starts_with(q))) {
        return Some((MatchType::TokenPrefix, distance));
    }
    if name.contains(q) {
        // Distance to the tightest name word holding the query; 0 if the
        // query spans several words.
        let distance =
            min_distance(q, split_words(&name).filter(|w| w.contains(q))).unwrap_or(0);
        return Some((MatchType::NameContains, distance));
    }
    if let Some(distance) = min_distance(q, tokens.iter().filter(|t| t.contains(q))) {
        return Some((MatchType::TokenContains, distance));
    }

    let everything = std::iter::once(name.as_str()).chain(tokens.iter().map(String::as_str));
    let best = min_distance(q, everything)?;
    (best <= fuzzy_threshold(q.chars().count())).then_some((MatchType::Fuzzy, best))
}

fn min_distance<I, S>(q: &str, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|c| levenshtein(q, c.as_ref()))
        .min()
}
