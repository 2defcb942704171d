#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use crate::models::studio::NormalizedEntity;

/// Longest prefix (in chars) stored as an index key. Longer tokens are still
/// reachable through their first `MAX_PREFIX_CHARS` characters.
pub const MAX_PREFIX_CHARS: usize = 12;

/// Token prefix → ids of entities owning a token with that prefix.
///
/// Always built whole from a set of entities; there is no incremental insert,
/// so a rebuild can never keep keys for entities that have gone away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    keys: HashMap<String, BTreeSet<String>>,
}

impl SearchIndex {
    pub fn build(entities: &[NormalizedEntity]) -> Self {
        let mut keys: HashMap<String, BTreeSet<String>> = HashMap::new();
        for entity in entities {
            for token in &entity.normalized.search_tokens {
                for prefix in prefixes(token) {
                    keys.entry(prefix.to_string())
                        .or_default()
                        .insert(entity.id().to_string());
                }
            }
        }
        Self { keys }
    }

    pub fn lookup(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.keys.get(prefix)
    }

    /// Ids reachable from any prefix of `query` (already case-folded).
    pub fn candidates(&self, query: &str) -> BTreeSet<&str> {
        prefixes(query)
            .filter_map(|p| self.lookup(p))
            .flat_map(|ids| ids.iter().map(String::as_str))
            .collect()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Non-empty prefixes of `token`, shortest first, capped at [`MAX_PREFIX_CHARS`].
pub fn prefixes(token: &str) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .skip(1)
        .map(|(idx, _)| idx)
        .chain(std::iter::once(token.len()))
        .take(MAX_PREFIX_CHARS)
        .filter(|&end| end > 0)
        .map(move |end| &token[..end])
}
