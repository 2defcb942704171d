//! Match Scoring — pluggable, trait-based scorer that measures a candidate
//! profile against a job posting.
//!
//! Default: `WeightedJobMatcher` (pure-Rust, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn JobMatcher>`, built at startup from config.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::dimensions::{
    culture_score, experience_score, location_score, salary_score, skills_score,
    technology_score, PreparedProfile,
};
use crate::matching::gaps::{analyze_gaps, improvement_areas, Dimension, MatchBreakdown};
use crate::matching::similarity::TermSimilarityResolver;
use crate::matching::weights::MatchWeights;
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;

/// Jobs scoring below this are never recommended.
pub const RECOMMEND_MIN_SCORE: u8 = 60;
pub const DEFAULT_RECOMMEND_LIMIT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Full result for one (profile, job) pair. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: String,
    pub match_score: u8, // 0 – 100
    pub match_breakdown: MatchBreakdown,
    pub missing_skills: Vec<String>,
    pub recommended_skills: Vec<String>, // ≤ 5
    pub improvement_areas: Vec<Dimension>,
    pub missing_critical: Vec<String>,
    pub missing_preferred: Vec<String>,
    /// Reserved. Always empty until the intended semantics are settled.
    pub strengths: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The job matcher trait. Implement this to swap scoring backends without
/// touching handlers or callers.
pub trait JobMatcher: Send + Sync {
    fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> MatchResult;

    /// Scores every job, keeps those at or above [`RECOMMEND_MIN_SCORE`],
    /// best first, at most `limit` results.
    fn recommend(
        &self,
        profile: &CandidateProfile,
        jobs: &[JobPosting],
        limit: usize,
    ) -> Vec<MatchResult>;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedJobMatcher — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Six-dimension weighted scorer.
///
/// `match_score = round(Σ weight_i × subscore_i)` over skills, experience,
/// location, salary, culture and technology.
#[derive(Debug, Clone, Default)]
pub struct WeightedJobMatcher {
    weights: MatchWeights,
    resolver: TermSimilarityResolver,
}

impl WeightedJobMatcher {
    pub fn new(weights: MatchWeights, resolver: TermSimilarityResolver) -> Self {
        Self { weights, resolver }
    }

    fn score_prepared(&self, candidate: &PreparedProfile<'_>, job: &JobPosting) -> MatchResult {
        let profile = candidate.profile;
        let skills = skills_score(candidate, job, &self.resolver);

        let match_breakdown = MatchBreakdown {
            skills_match: skills.score,
            experience_match: experience_score(profile.experience_years, job.experience_level),
            location_match: location_score(profile, job),
            salary_match: salary_score(profile.salary_expectation.as_ref(), job.salary.as_ref()),
            culture_match: culture_score(candidate, job),
            technology_match: technology_score(candidate, job, &self.resolver),
        };

        let match_score = self.composite(&match_breakdown);
        let gaps = analyze_gaps(candidate, job, &self.resolver);

        debug!(
            job_id = %job.id,
            match_score,
            missing = gaps.missing.len(),
            "scored job"
        );

        MatchResult {
            job_id: job.id.clone(),
            match_score,
            improvement_areas: improvement_areas(&match_breakdown),
            match_breakdown,
            missing_skills: gaps.missing,
            recommended_skills: gaps.recommended,
            missing_critical: skills.missing_critical,
            missing_preferred: skills.missing_preferred,
            strengths: Vec::new(),
        }
    }

    fn composite(&self, b: &MatchBreakdown) -> u8 {
        let w = &self.weights;
        let total = w.skills * b.skills_match
            + w.experience * b.experience_match
            + w.location * b.location_match
            + w.salary * b.salary_match
            + w.culture * b.culture_match
            + w.technology * b.technology_match;
        total.round().clamp(0.0, 100.0) as u8
    }
}

impl JobMatcher for WeightedJobMatcher {
    fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> MatchResult {
        self.score_prepared(&PreparedProfile::new(profile), job)
    }

    fn recommend(
        &self,
        profile: &CandidateProfile,
        jobs: &[JobPosting],
        limit: usize,
    ) -> Vec<MatchResult> {
        let candidate = PreparedProfile::new(profile);

        let mut results: Vec<MatchResult> = jobs
            .iter()
            .map(|job| self.score_prepared(&candidate, job))
            .filter(|result| result.match_score >= RECOMMEND_MIN_SCORE)
            .collect();

        // Stable: equal scores keep catalog order.
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results.truncate(limit);

        debug!(
            jobs = jobs.len(),
            recommended = results.len(),
            limit,
            "recommendation pass complete"
        );
        results
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceLevel, JobSalary, StudioType};
    use crate::models::profile::{SalaryRange, WorkStyle};

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_profile() -> CandidateProfile {
        CandidateProfile {
            skills: owned(&["Unity", "C#", "Gameplay Programming"]),
            experience_years: 4.0,
            interests: owned(&["indie", "roguelike"]),
            location: Some("Montreal, Canada".to_string()),
            salary_expectation: Some(SalaryRange::new(80_000.0, 100_000.0)),
            work_style: Some(WorkStyle::Hybrid),
            technologies: owned(&["Unity", "Git"]),
        }
    }

    fn make_job(id: &str, requirements: &[&str]) -> JobPosting {
        JobPosting {
            technologies: owned(&["Unity"]),
            experience_level: Some(ExperienceLevel::Mid),
            location: "Montreal".to_string(),
            salary: Some(JobSalary::Range(SalaryRange::new(85_000.0, 95_000.0))),
            studio_type: Some(StudioType::Indie),
            ..JobPosting::new(id).with_ordered_requirements(requirements.iter().copied())
        }
    }

    fn matcher() -> WeightedJobMatcher {
        WeightedJobMatcher::default()
    }

    #[test]
    fn test_strong_fit_breakdown() {
        let job = JobPosting {
            company: Some("Ubisoft".to_string()),
            ..make_job("perfect", &["Unity", "C#"])
        };
        let result = matcher().score(&make_profile(), &job);
        assert_eq!(result.match_breakdown.skills_match, 100.0);
        assert_eq!(result.match_breakdown.experience_match, 100.0);
        assert_eq!(result.match_breakdown.location_match, 100.0);
        assert_eq!(result.match_breakdown.salary_match, 100.0);
        assert_eq!(result.match_breakdown.culture_match, 90.0);
        assert_eq!(result.match_breakdown.technology_match, 100.0);
        // 35 + 25 + 15 + 10 + 9 + 5
        assert_eq!(result.match_score, 99);
        assert!(result.improvement_areas.is_empty());
    }

    #[test]
    fn test_all_subscores_at_100_compose_to_100() {
        let breakdown = MatchBreakdown {
            skills_match: 100.0,
            experience_match: 100.0,
            location_match: 100.0,
            salary_match: 100.0,
            culture_match: 100.0,
            technology_match: 100.0,
        };
        assert_eq!(matcher().composite(&breakdown), 100);
    }

    #[test]
    fn test_all_subscores_at_0_compose_to_0() {
        assert_eq!(matcher().composite(&MatchBreakdown::default()), 0);
    }

    #[test]
    fn test_gap_fields_for_missing_requirement() {
        let profile = CandidateProfile {
            skills: owned(&["unity", "c#"]),
            ..CandidateProfile::default()
        };
        let job = JobPosting::new("g").with_ordered_requirements(["Unity", "C#", "Git"]);
        let result = matcher().score(&profile, &job);
        assert_eq!(result.job_id, "g");
        assert_eq!(result.missing_skills, owned(&["Git"]));
        assert_eq!(result.recommended_skills, owned(&["Git"]));
        assert_eq!(result.missing_critical, owned(&["Git"]));
    }

    #[test]
    fn test_empty_inputs_still_produce_bounded_result() {
        let result = matcher().score(&CandidateProfile::default(), &JobPosting::default());
        assert!(result.match_score <= 100);
        for (_, value) in result.match_breakdown.entries() {
            assert!((0.0..=100.0).contains(&value), "sub-score {value} out of range");
        }
    }

    #[test]
    fn test_scores_stay_in_bounds_across_varied_pairs() {
        let profiles = [
            CandidateProfile::default(),
            make_profile(),
            CandidateProfile {
                experience_years: 40.0,
                work_style: Some(WorkStyle::Remote),
                salary_expectation: Some(SalaryRange::new(500_000.0, 600_000.0)),
                ..CandidateProfile::default()
            },
        ];
        let jobs = [
            JobPosting::default(),
            make_job("a", &["Unreal", "C++", "Houdini", "Perforce"]),
            JobPosting {
                remote: true,
                salary: Some(JobSalary::Unstructured("DOE".to_string())),
                experience_level: Some(ExperienceLevel::Entry),
                ..JobPosting::new("b")
            },
        ];
        for profile in &profiles {
            for job in &jobs {
                let result = matcher().score(profile, job);
                assert!(result.match_score <= 100);
                for (dimension, value) in result.match_breakdown.entries() {
                    assert!(
                        (0.0..=100.0).contains(&value),
                        "{dimension:?} = {value} out of range"
                    );
                }
                assert!(result.recommended_skills.len() <= 5);
            }
        }
    }

    #[test]
    fn test_strengths_reserved_and_empty() {
        // Known gap: semantics of `strengths` are not defined yet.
        let result = matcher().score(&make_profile(), &make_job("s", &["Unity"]));
        assert!(result.strengths.is_empty());
    }

    #[test]
    fn test_recommend_filters_sorts_and_limits() {
        let profile = make_profile();
        let strong = make_job("strong", &["Unity", "C#"]);
        let weaker = make_job("weaker", &["Unity", "C#", "Houdini"]);
        let poor = JobPosting {
            experience_level: Some(ExperienceLevel::Director),
            location: "Dundee".to_string(),
            salary: Some(JobSalary::Range(SalaryRange::new(20_000.0, 25_000.0))),
            remote: false,
            ..JobPosting::new("poor")
                .with_ordered_requirements(["Maya", "ZBrush", "Substance Painter"])
        };
        let jobs = vec![poor, weaker, strong];

        let results = matcher().recommend(&profile, &jobs, 10);
        assert!(results.iter().all(|r| r.match_score >= RECOMMEND_MIN_SCORE));
        assert!(results
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
        assert_eq!(results[0].job_id, "strong");
        assert!(results.iter().all(|r| r.job_id != "poor"));

        let limited = matcher().recommend(&profile, &jobs, 1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].job_id, "strong");
    }

    #[test]
    fn test_recommend_zero_limit_and_empty_catalog() {
        let profile = make_profile();
        assert!(matcher().recommend(&profile, &[], 10).is_empty());
        assert!(matcher()
            .recommend(&profile, &[make_job("a", &["Unity"])], 0)
            .is_empty());
    }

    #[test]
    fn test_custom_weights_change_composite() {
        let weights = MatchWeights {
            skills: 1.0,
            experience: 0.0,
            location: 0.0,
            salary: 0.0,
            culture: 0.0,
            technology: 0.0,
        };
        let m = WeightedJobMatcher::new(weights, TermSimilarityResolver::default());
        let profile = CandidateProfile {
            skills: owned(&["unity"]),
            ..CandidateProfile::default()
        };
        let job = JobPosting::new("w").with_ordered_requirements(["Unity", "Git"]);
        // critical = both entries (ceil 1.4 = 2): 1/2 * 70 + 30 = 65
        assert_eq!(m.score(&profile, &job).match_score, 65);
    }

    #[test]
    fn test_salary_objects_without_bounds_score_neutral() {
        let banded_profile = make_profile();
        let banded_job = make_job("banded", &["Unity"]);

        let empty_job: JobPosting = serde_json::from_value(serde_json::json!({
            "id": "empty", "salary": {}
        }))
        .unwrap();
        let currency_job: JobPosting = serde_json::from_value(serde_json::json!({
            "id": "currency", "salary": { "currency": "USD" }
        }))
        .unwrap();
        let empty_profile: CandidateProfile =
            serde_json::from_value(serde_json::json!({ "salaryExpectation": {} })).unwrap();

        let m = matcher();
        for job in [&empty_job, &currency_job] {
            assert_eq!(m.score(&banded_profile, job).match_breakdown.salary_match, 70.0);
        }
        assert_eq!(
            m.score(&empty_profile, &banded_job).match_breakdown.salary_match,
            70.0
        );
    }
}
