//! Entity Normalizer — derives canonical, searchable attributes from raw
//! studio records. Pure and deterministic: the same raw fields always yield
//! the same [`NormalizedEntity`].

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use crate::models::studio::{
    NormalizedAttributes, NormalizedEntity, OrganizationRecord, Region, RoleCategory, SizeBucket,
};

const NORTH_AMERICA: &[&str] = &[
    "usa", "united states", "canada", "mexico", "california", "texas", "washington",
    "new york", "san francisco", "los angeles", "seattle", "austin", "boston", "montreal",
    "vancouver", "toronto", "quebec", ", ca", ", wa", ", tx", ", ny", ", ma", ", nc", ", in",
];
const EUROPE: &[&str] = &[
    "uk", "united kingdom", "england", "scotland", "ireland", "france", "germany", "sweden",
    "finland", "norway", "denmark", "netherlands", "poland", "spain", "italy", "czech",
    "london", "paris", "berlin", "stockholm", "helsinki", "amsterdam", "warsaw", "krakow",
    "copenhagen", "guildford", "dundee",
];
const ASIA: &[&str] = &[
    "japan", "china", "korea", "singapore", "india", "taiwan", "vietnam", "tokyo", "kyoto",
    "osaka", "shanghai", "beijing", "shenzhen", "seoul", "hong kong", "malaysia",
];
const OCEANIA: &[&str] = &[
    "australia", "new zealand", "sydney", "melbourne", "brisbane", "auckland", "wellington",
];

const ROLE_RULES: &[(&[&str], RoleCategory)] = &[
    (&["engineer", "programmer", "developer"], RoleCategory::Engineering),
    (&["designer", "ux", "level", "narrative"], RoleCategory::Design),
    (&["artist", "animator", "vfx"], RoleCategory::Art),
    (&["producer", "manager", "director"], RoleCategory::Production),
    (&["audio", "sound", "voice"], RoleCategory::Audio),
    (&["data", "analyst", "scientist"], RoleCategory::DataAnalytics),
    (&["community", "marketing", "social"], RoleCategory::Community),
];

/// Case-insensitive technology key → canonical spelling (first seen in the corpus).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechCanonicalizer {
    canonical: HashMap<String, String>,
}

impl TechCanonicalizer {
    /// Builds the table from every technology across `records`, in order.
    pub fn from_corpus<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a OrganizationRecord>,
    {
        let mut canonical = HashMap::new();
        for record in records {
            for tech in &record.technologies {
                let display = tech.trim();
                if display.is_empty() {
                    continue;
                }
                canonical
                    .entry(display.to_lowercase())
                    .or_insert_with(|| display.to_string());
            }
        }
        Self { canonical }
    }

    /// Canonical spelling for `tech`; unseen terms keep their trimmed spelling.
    pub fn canonicalize(&self, tech: &str) -> String {
        let display = tech.trim();
        self.canonical
            .get(&display.to_lowercase())
            .cloned()
            .unwrap_or_else(|| display.to_string())
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// Normalizes raw records against a technology table built from their corpus.
#[derive(Debug, Clone, Default)]
pub struct EntityNormalizer {
    technologies: TechCanonicalizer,
}

impl EntityNormalizer {
    pub fn new(technologies: TechCanonicalizer) -> Self {
        Self { technologies }
    }

    pub fn from_corpus(records: &[OrganizationRecord]) -> Self {
        Self::new(TechCanonicalizer::from_corpus(records))
    }

    pub fn normalize(&self, raw: &OrganizationRecord) -> NormalizedEntity {
        let region = classify_region(&raw.headquarters);
        let size_bucket = classify_size(&raw.size);

        let categories: Vec<String> = raw
            .categories
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let tech_tags: Vec<String> = raw
            .technologies
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| self.technologies.canonicalize(t))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let role_categories: Vec<RoleCategory> = raw
            .common_roles
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| classify_role(r))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut tokens = TokenSet::default();
        tokens.add_field(&raw.name);
        tokens.add_words(&raw.description);
        tokens.add_field(&raw.headquarters);
        for value in raw
            .games
            .iter()
            .chain(raw.technologies.iter())
            .chain(raw.common_roles.iter())
            .chain(categories.iter())
            .chain(tech_tags.iter())
        {
            tokens.add_field(value);
        }
        tokens.add_field(region.as_str());
        tokens.add_field(size_bucket.as_str());
        for role in &role_categories {
            tokens.add_field(role.as_str());
        }

        NormalizedEntity {
            record: raw.clone(),
            normalized: NormalizedAttributes {
                region,
                size_bucket,
                categories,
                tech_tags,
                role_categories,
                search_tokens: tokens.0,
            },
        }
    }

    pub fn normalize_all(&self, records: &[OrganizationRecord]) -> Vec<NormalizedEntity> {
        records.iter().map(|r| self.normalize(r)).collect()
    }
}

pub fn classify_region(headquarters: &str) -> Region {
    let hq = Headquarters::new(headquarters);
    let lists: [(&[&str], Region); 4] = [
        (NORTH_AMERICA, Region::NorthAmerica),
        (EUROPE, Region::Europe),
        (ASIA, Region::Asia),
        (OCEANIA, Region::Oceania),
    ];
    for (keywords, region) in lists {
        if keywords.iter().any(|k| hq.matches(k)) {
            return region;
        }
    }
    Region::Other
}

/// A case-folded headquarters string split for keyword matching.
struct Headquarters {
    words: Vec<String>,
    /// Trimmed parts after the first comma: "Redmond, WA" → ["wa"].
    qualifiers: Vec<String>,
}

impl Headquarters {
    fn new(raw: &str) -> Self {
        let folded = raw.to_lowercase();
        Self {
            words: place_words(&folded).map(str::to_string).collect(),
            qualifiers: folded
                .split(',')
                .skip(1)
                .map(|part| part.trim().to_string())
                .collect(),
        }
    }

    /// `", wa"`-style keywords must equal a whole comma-separated qualifier;
    /// place names must match a run of whole words ("new york", "uk").
    fn matches(&self, keyword: &str) -> bool {
        if let Some(code) = keyword.strip_prefix(',') {
            let code = code.trim();
            return self.qualifiers.iter().any(|q| q == code);
        }
        let wanted: Vec<&str> = place_words(keyword).collect();
        !wanted.is_empty()
            && self
                .words
                .windows(wanted.len())
                .any(|run| run.iter().zip(&wanted).all(|(a, b)| a == b))
    }
}

fn place_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Numeric descriptors win over keywords. The largest number is the headcount;
/// a trailing `+` means "more than".
pub fn classify_size(descriptor: &str) -> SizeBucket {
    let text = descriptor.to_lowercase();

    if let Some(headcount) = largest_headcount(&text) {
        return match headcount {
            n if n <= 10 => SizeBucket::Indie,
            n if n <= 50 => SizeBucket::Small,
            n if n <= 200 => SizeBucket::Mid,
            n if n <= 1000 => SizeBucket::Large,
            _ => SizeBucket::Enterprise,
        };
    }

    let keyword_rules: [(&[&str], SizeBucket); 5] = [
        (&["indie", "solo", "micro"], SizeBucket::Indie),
        (&["small", "boutique"], SizeBucket::Small),
        (&["mid", "medium"], SizeBucket::Mid),
        (&["large", "big"], SizeBucket::Large),
        (&["enterprise", "aaa", "multinational", "global"], SizeBucket::Enterprise),
    ];
    for (keywords, bucket) in keyword_rules {
        if keywords.iter().any(|k| text.contains(k)) {
            return bucket;
        }
    }
    SizeBucket::Mid
}

fn largest_headcount(text: &str) -> Option<u64> {
    let chars: Vec<char> = text.chars().filter(|c| *c != ',').collect();
    let mut best: Option<u64> = None;
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let digits: String = chars[start..i].iter().collect();
        let Ok(mut n) = digits.parse::<u64>() else {
            continue;
        };
        if chars.get(i) == Some(&'k') {
            n = n.saturating_mul(1000);
            i += 1;
        }
        if chars.get(i) == Some(&'+') {
            n = n.saturating_add(1);
        }
        best = Some(best.map_or(n, |b| b.max(n)));
    }
    best
}

pub fn classify_role(role: &str) -> RoleCategory {
    let role = role.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| role.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(RoleCategory::Other)
}

#[derive(Debug, Default)]
struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Adds the whole lowercased value and each of its words.
    fn add_field(&mut self, value: &str) {
        let whole = value.trim().to_lowercase();
        if whole.is_empty() {
            return;
        }
        self.add_words(&whole);
        self.0.insert(whole);
    }

    fn add_words(&mut self, text: &str) {
        for word in split_words(text) {
            self.0.insert(word);
        }
    }
}

/// Lowercased words. `+`, `#` and `.` stay inside words so "C++", "C#" and
/// "Node.js" survive; trailing dots are stripped.
pub fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|w| w.trim_end_matches('.').to_lowercase())
        .filter(|w| !w.is_empty())
}
