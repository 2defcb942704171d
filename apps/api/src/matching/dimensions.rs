//! The six sub-scores of a match. Each returns a value in `[0, 100]` and never fails:
//! absent inputs score a neutral constant instead.

use std::collections::HashSet;

use crate::matching::similarity::{fold, TermSimilarityResolver};
use crate::models::job::{ExperienceLevel, JobPosting, JobSalary, StudioType};
use crate::models::profile::{CandidateProfile, SalaryRange, WorkStyle};

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

const CRITICAL_POINTS: f64 = 70.0;
const PREFERRED_POINTS: f64 = 30.0;

const NEUTRAL_EXPERIENCE: f64 = 70.0;
const EXPERIENCE_FLOOR: f64 = 20.0;
const EXPERIENCE_PENALTY_PER_YEAR: f64 = 10.0;

const NEUTRAL_LOCATION: f64 = 60.0;

const NEUTRAL_SALARY: f64 = 70.0;
const SALARY_OVERLAP_BASE: f64 = 60.0;
const SALARY_FLOOR: f64 = 20.0;

const CULTURE_BASE: f64 = 60.0;
const CULTURE_EMPLOYER_BONUS: f64 = 10.0;

const NO_TECHNOLOGIES: f64 = 80.0;
const TECHNOLOGY_BASE: f64 = 60.0;
const TECHNOLOGY_SPAN: f64 = 40.0;

const MAJOR_HUBS: &[&str] = &[
    "san francisco",
    "los angeles",
    "seattle",
    "austin",
    "new york",
    "boston",
    "montreal",
    "vancouver",
    "toronto",
    "london",
    "paris",
    "berlin",
    "stockholm",
    "helsinki",
    "amsterdam",
    "warsaw",
    "tokyo",
    "seoul",
    "shanghai",
    "singapore",
    "sydney",
];

const AAA_INTERESTS: &[&str] = &[
    "aaa",
    "console",
    "open world",
    "action",
    "rpg",
    "shooter",
    "blockbuster",
];
const INDIE_INTERESTS: &[&str] = &[
    "indie",
    "pixel art",
    "narrative",
    "experimental",
    "roguelike",
    "small team",
    "creative freedom",
];
const MOBILE_INTERESTS: &[&str] = &[
    "mobile",
    "casual",
    "puzzle",
    "free-to-play",
    "f2p",
    "hyper-casual",
    "live ops",
];

const RECOGNIZED_EMPLOYERS: &[&str] = &[
    "electronic arts",
    "ubisoft",
    "activision",
    "blizzard",
    "nintendo",
    "sony",
    "microsoft",
    "epic games",
    "riot games",
    "valve",
    "rockstar",
    "bethesda",
    "square enix",
    "bandai namco",
    "tencent",
    "netease",
    "supercell",
];

// ────────────────────────────────────────────────────────────────────────────
// Prepared candidate
// ────────────────────────────────────────────────────────────────────────────

/// A candidate with its term lists folded once, reused across many jobs.
#[derive(Debug, Clone)]
pub struct PreparedProfile<'a> {
    pub profile: &'a CandidateProfile,
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub interests: HashSet<String>,
}

impl<'a> PreparedProfile<'a> {
    pub fn new(profile: &'a CandidateProfile) -> Self {
        let fold_all = |terms: &[String]| -> Vec<String> {
            terms
                .iter()
                .map(|t| fold(t))
                .filter(|t| !t.is_empty())
                .collect()
        };
        Self {
            profile,
            skills: fold_all(&profile.skills),
            technologies: fold_all(&profile.technologies),
            interests: fold_all(&profile.interests).into_iter().collect(),
        }
    }

    /// True if some candidate skill is similar to `term`.
    pub fn has_skill(&self, term: &str, resolver: &TermSimilarityResolver) -> bool {
        any_similar(&self.skills, term, resolver)
    }

    /// True if some candidate technology is similar to `term`.
    pub fn has_technology(&self, term: &str, resolver: &TermSimilarityResolver) -> bool {
        any_similar(&self.technologies, term, resolver)
    }
}

fn any_similar(folded: &[String], term: &str, resolver: &TermSimilarityResolver) -> bool {
    let term = fold(term);
    folded
        .iter()
        .any(|have| resolver.are_similar_folded(have, &term))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsOutcome {
    pub score: f64,
    pub missing_critical: Vec<String>,
    pub missing_preferred: Vec<String>,
}

/// 70 points for the critical list, 30 for the preferred list, each scaled by
/// the matched fraction. An empty list awards its points in full.
pub fn skills_score(
    candidate: &PreparedProfile<'_>,
    job: &JobPosting,
    resolver: &TermSimilarityResolver,
) -> SkillsOutcome {
    let (critical_points, missing_critical) = tier_points(
        candidate,
        &job.critical_requirements,
        CRITICAL_POINTS,
        resolver,
    );
    let (preferred_points, missing_preferred) = tier_points(
        candidate,
        &job.preferred_requirements,
        PREFERRED_POINTS,
        resolver,
    );

    SkillsOutcome {
        score: (critical_points + preferred_points).round().min(100.0),
        missing_critical,
        missing_preferred,
    }
}

fn tier_points(
    candidate: &PreparedProfile<'_>,
    requirements: &[String],
    points: f64,
    resolver: &TermSimilarityResolver,
) -> (f64, Vec<String>) {
    if requirements.is_empty() {
        return (points, Vec::new());
    }
    let missing: Vec<String> = requirements
        .iter()
        .filter(|req| !candidate.has_skill(req, resolver))
        .cloned()
        .collect();
    let matched = requirements.len() - missing.len();
    let fraction = matched as f64 / requirements.len() as f64;
    (fraction * points, missing)
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Expected years `(min, max)` per level.
pub fn experience_range(level: ExperienceLevel) -> (f64, f64) {
    match level {
        ExperienceLevel::Entry => (0.0, 2.0),
        ExperienceLevel::Junior => (1.0, 3.0),
        ExperienceLevel::Mid => (3.0, 6.0),
        ExperienceLevel::Senior => (5.0, 10.0),
        ExperienceLevel::Principal => (8.0, 15.0),
        ExperienceLevel::Director => (10.0, 20.0),
    }
}

pub fn experience_score(years: f64, level: Option<ExperienceLevel>) -> f64 {
    let Some(level) = level else {
        return NEUTRAL_EXPERIENCE;
    };
    let (min, max) = experience_range(level);
    if (min..=max).contains(&years) {
        return 100.0;
    }
    let distance = if years < min { min - years } else { years - max };
    (100.0 - distance * EXPERIENCE_PENALTY_PER_YEAR).max(EXPERIENCE_FLOOR)
}

// ────────────────────────────────────────────────────────────────────────────
// Location
// ────────────────────────────────────────────────────────────────────────────

pub fn location_score(profile: &CandidateProfile, job: &JobPosting) -> f64 {
    match (profile.work_style, job.remote) {
        (Some(WorkStyle::Remote), true) => return 100.0,
        (Some(WorkStyle::Remote), false) => return 30.0,
        (Some(WorkStyle::Onsite), true) => return 40.0,
        _ => {}
    }

    let candidate = profile
        .location
        .as_deref()
        .map(fold)
        .filter(|l| !l.is_empty());
    let posted = fold(&job.location);
    let Some(candidate) = candidate.filter(|_| !posted.is_empty()) else {
        return NEUTRAL_LOCATION;
    };

    if candidate.contains(&posted) || posted.contains(&candidate) {
        return 100.0;
    }

    let candidate_parts: HashSet<&str> = comma_parts(&candidate).collect();
    if comma_parts(&posted).any(|part| candidate_parts.contains(part)) {
        return 80.0;
    }

    if MAJOR_HUBS.iter().any(|hub| posted.contains(hub)) {
        return 70.0;
    }

    50.0
}

fn comma_parts(location: &str) -> impl Iterator<Item = &str> {
    location.split(',').map(str::trim).filter(|p| !p.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Salary
// ────────────────────────────────────────────────────────────────────────────

pub fn salary_score(expectation: Option<&SalaryRange>, offer: Option<&JobSalary>) -> f64 {
    let (Some(expectation), Some(JobSalary::Range(offer))) = (expectation, offer) else {
        return NEUTRAL_SALARY;
    };
    let (want_min, want_max) = expectation.bounds();
    let (job_min, job_max) = offer.bounds();

    if job_min >= want_min && job_max <= want_max {
        return 100.0;
    }

    let overlap = want_max.min(job_max) - want_min.max(job_min);
    if overlap >= 0.0 {
        let width = want_max - want_min;
        let ratio = if width > 0.0 { overlap / width } else { 1.0 };
        return (SALARY_OVERLAP_BASE + ratio * 40.0).clamp(SALARY_OVERLAP_BASE, 100.0);
    }

    let gap = if job_max < want_min {
        want_min - job_max
    } else {
        job_min - want_max
    };
    let average = (want_min + want_max) / 2.0;
    if average <= 0.0 {
        return SALARY_FLOOR;
    }
    let gap_percent = gap / average;
    (100.0 - gap_percent * 100.0).round().max(SALARY_FLOOR)
}

// ────────────────────────────────────────────────────────────────────────────
// Culture
// ────────────────────────────────────────────────────────────────────────────

fn studio_interests(studio_type: StudioType) -> (&'static [&'static str], f64) {
    match studio_type {
        StudioType::AAA => (AAA_INTERESTS, 20.0),
        StudioType::Indie => (INDIE_INTERESTS, 20.0),
        StudioType::Mobile => (MOBILE_INTERESTS, 15.0),
    }
}

pub fn culture_score(candidate: &PreparedProfile<'_>, job: &JobPosting) -> f64 {
    let mut score = CULTURE_BASE;

    if let Some(studio_type) = job.studio_type {
        let (keywords, bonus) = studio_interests(studio_type);
        if keywords.iter().any(|k| candidate.interests.contains(*k)) {
            score += bonus;
        }
    }

    if let Some(company) = job.company.as_deref().map(fold) {
        if RECOGNIZED_EMPLOYERS.iter().any(|e| company.contains(e)) {
            score += CULTURE_EMPLOYER_BONUS;
        }
    }

    score.min(100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Technology
// ────────────────────────────────────────────────────────────────────────────

pub fn technology_score(
    candidate: &PreparedProfile<'_>,
    job: &JobPosting,
    resolver: &TermSimilarityResolver,
) -> f64 {
    if job.technologies.is_empty() {
        return NO_TECHNOLOGIES;
    }
    let matched = job
        .technologies
        .iter()
        .filter(|tech| candidate.has_technology(tech, resolver))
        .count();
    let pct = matched as f64 / job.technologies.len() as f64;
    (TECHNOLOGY_BASE + (pct * TECHNOLOGY_SPAN).min(TECHNOLOGY_SPAN)).round()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
