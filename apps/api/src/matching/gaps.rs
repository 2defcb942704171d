//! Gap analysis and improvement priorities for a single match.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::dimensions::PreparedProfile;
use crate::matching::similarity::{fold, TermSimilarityResolver};
use crate::models::job::JobPosting;

/// At most this many missing entries are surfaced as recommendations.
pub const MAX_RECOMMENDED: usize = 5;

/// Sub-scores below this value are reported as improvement areas.
pub const IMPROVEMENT_THRESHOLD: f64 = 70.0;

/// One of the six weighted match dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    SkillsMatch,
    ExperienceMatch,
    LocationMatch,
    SalaryMatch,
    CultureMatch,
    TechnologyMatch,
}

/// Per-dimension sub-scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skills_match: f64,
    pub experience_match: f64,
    pub location_match: f64,
    pub salary_match: f64,
    pub culture_match: f64,
    pub technology_match: f64,
}

impl MatchBreakdown {
    /// All six dimensions in declaration order.
    pub fn entries(&self) -> [(Dimension, f64); 6] {
        [
            (Dimension::SkillsMatch, self.skills_match),
            (Dimension::ExperienceMatch, self.experience_match),
            (Dimension::LocationMatch, self.location_match),
            (Dimension::SalaryMatch, self.salary_match),
            (Dimension::CultureMatch, self.culture_match),
            (Dimension::TechnologyMatch, self.technology_match),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GapAnalysis {
    pub missing: Vec<String>,
    pub recommended: Vec<String>,
}

/// Requirements and technologies (deduplicated case-insensitively, first
/// occurrence kept) that no candidate skill covers.
pub fn analyze_gaps(
    candidate: &PreparedProfile<'_>,
    job: &JobPosting,
    resolver: &TermSimilarityResolver,
) -> GapAnalysis {
    let mut seen = HashSet::new();
    let missing: Vec<String> = job
        .requirements()
        .chain(job.technologies.iter())
        .filter(|entry| {
            let key = fold(entry);
            !key.is_empty() && seen.insert(key)
        })
        .filter(|entry| !candidate.has_skill(entry, resolver))
        .cloned()
        .collect();

    let recommended = missing.iter().take(MAX_RECOMMENDED).cloned().collect();
    GapAnalysis {
        missing,
        recommended,
    }
}

/// Dimensions scoring under [`IMPROVEMENT_THRESHOLD`], weakest first.
/// Ties keep declaration order.
pub fn improvement_areas(breakdown: &MatchBreakdown) -> Vec<Dimension> {
    let mut weak: Vec<(Dimension, f64)> = breakdown
        .entries()
        .into_iter()
        .filter(|(_, value)| *value < IMPROVEMENT_THRESHOLD)
        .collect();
    weak.sort_by(|a, b| a.1.total_cmp(&b.1));
    weak.into_iter().map(|(dimension, _)| dimension).collect()
}
