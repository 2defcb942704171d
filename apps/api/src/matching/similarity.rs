//! Term similarity — decides whether two free-text skill/technology terms name
//! the same competency.
//!
//! Resolution order, first hit wins:
//! 1. case-folded, trimmed equality
//! 2. membership in one synonym group of the injected [`SynonymTable`]
//! 3. bounded substring containment (both terms longer than 2 chars)
//!
//! Step 3 is a heuristic. It is known to over-match some pairs, e.g. "Java"
//! and "JavaScript", or "Art" and "Artificial Intelligence"; callers that need
//! strictness should add explicit synonym groups instead of relying on it.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Minimum length (exclusive, in chars) for substring containment to count.
const MIN_CONTAINMENT_LEN: usize = 2;

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    // Languages
    ("javascript", &["js", "node.js", "nodejs", "ecmascript"]),
    ("typescript", &["ts"]),
    ("c++", &["cpp", "c plus plus"]),
    ("c#", &["csharp", "c sharp"]),
    ("python", &["py", "python3"]),
    ("objective-c", &["objc", "obj-c"]),
    ("golang", &["go"]),
    // Engines
    ("unreal engine", &["unreal", "ue4", "ue5", "unreal engine 5"]),
    ("unity", &["unity3d", "unity engine"]),
    ("godot", &["godot engine"]),
    // Graphics
    ("directx", &["direct3d", "dx11", "dx12"]),
    ("opengl", &["gl", "opengl es"]),
    ("hlsl", &["shader programming", "shaders"]),
    // Content tools
    ("maya", &["autodesk maya"]),
    ("3ds max", &["3dsmax", "autodesk 3ds max"]),
    ("photoshop", &["adobe photoshop"]),
    ("substance painter", &["substance", "adobe substance"]),
    ("houdini", &["sidefx houdini"]),
    // Disciplines
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai", "game ai"]),
    ("user experience", &["ux", "ux design"]),
    ("user interface", &["ui", "ui design"]),
    ("continuous integration", &["ci", "ci/cd"]),
    // Infrastructure
    ("kubernetes", &["k8s"]),
    ("postgresql", &["postgres", "psql"]),
    ("amazon web services", &["aws"]),
    ("google cloud platform", &["gcp", "google cloud"]),
    ("perforce", &["p4", "helix core"]),
];

/// Immutable synonym configuration: canonical term → synonym set.
///
/// Terms are stored case-folded. A term may belong to several groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct SynonymTable {
    groups: Vec<(String, Vec<String>)>,
    membership: HashMap<String, Vec<usize>>,
}

impl SynonymTable {
    pub fn empty() -> Self {
        Self::from_groups(std::iter::empty::<(String, Vec<String>)>())
    }

    pub fn from_groups<I, K, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<S>)>,
        K: AsRef<str>,
        S: AsRef<str>,
    {
        let mut table = SynonymTable {
            groups: Vec::new(),
            membership: HashMap::new(),
        };

        for (canonical, synonyms) in groups {
            let canonical = fold(canonical.as_ref());
            if canonical.is_empty() {
                continue;
            }
            let synonyms: Vec<String> = synonyms
                .iter()
                .map(|s| fold(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect();

            let group_idx = table.groups.len();
            for term in std::iter::once(&canonical).chain(synonyms.iter()) {
                let slots = table.membership.entry(term.clone()).or_default();
                if !slots.contains(&group_idx) {
                    slots.push(group_idx);
                }
            }
            table.groups.push((canonical, synonyms));
        }

        table
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// True if both folded terms sit in one group (canonical key included).
    fn share_group(&self, a: &str, b: &str) -> bool {
        match (self.membership.get(a), self.membership.get(b)) {
            (Some(left), Some(right)) => left.iter().any(|idx| right.contains(idx)),
            _ => false,
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::from_groups(
            DEFAULT_SYNONYMS
                .iter()
                .map(|(canonical, synonyms)| (*canonical, synonyms.to_vec())),
        )
    }
}

impl From<BTreeMap<String, Vec<String>>> for SynonymTable {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self::from_groups(map)
    }
}

impl From<SynonymTable> for BTreeMap<String, Vec<String>> {
    fn from(table: SynonymTable) -> Self {
        table.groups.into_iter().collect()
    }
}

/// Case-folds and trims a term. All comparisons run on folded terms.
pub fn fold(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Pure, symmetric term comparison over an injected synonym table.
#[derive(Debug, Clone, Default)]
pub struct TermSimilarityResolver {
    synonyms: SynonymTable,
}

impl TermSimilarityResolver {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn are_similar(&self, a: &str, b: &str) -> bool {
        self.are_similar_folded(&fold(a), &fold(b))
    }

    /// Same as [`Self::are_similar`] for terms already passed through [`fold`].
    pub fn are_similar_folded(&self, a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }
        if self.synonyms.share_group(a, b) {
            return true;
        }
        a.chars().count() > MIN_CONTAINMENT_LEN
            && b.chars().count() > MIN_CONTAINMENT_LEN
            && (a.contains(b) || b.contains(a))
    }
}
