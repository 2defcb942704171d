#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::profile::SalaryRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[serde(alias = "Entry")]
    Entry,
    #[serde(alias = "Junior")]
    Junior,
    #[serde(alias = "Mid", alias = "mid-level")]
    Mid,
    #[serde(alias = "Senior")]
    Senior,
    #[serde(alias = "Principal")]
    Principal,
    #[serde(alias = "Director")]
    Director,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudioType {
    #[serde(alias = "aaa")]
    AAA,
    #[serde(alias = "indie")]
    Indie,
    #[serde(alias = "mobile")]
    Mobile,
}

/// Job salary as posted: either a structured band or free text ("competitive").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobSalary {
    Range(SalaryRange),
    Unstructured(String),
}

/// The job side of a match.
///
/// Must-have and nice-to-have requirements are held separately. Callers that
/// only have one ordered list can use [`JobPosting::with_ordered_requirements`]
/// or send a plain `requirements` array on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "JobPostingWire")]
pub struct JobPosting {
    pub id: String,
    pub critical_requirements: Vec<String>,
    pub preferred_requirements: Vec<String>,
    pub technologies: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub location: String,
    pub remote: bool,
    pub salary: Option<JobSalary>,
    pub company: Option<String>,
    pub studio_type: Option<StudioType>,
}

/// Share of an ordered requirement list treated as critical, in tenths (ceil).
const CRITICAL_SHARE_TENTHS: usize = 7;

/// Splits an ordered requirement list into `(critical, preferred)`: the first
/// `ceil(0.7 * len)` entries are critical.
pub fn split_ordered_requirements(requirements: Vec<String>) -> (Vec<String>, Vec<String>) {
    let critical_len = (requirements.len() * CRITICAL_SHARE_TENTHS).div_ceil(10);
    let mut critical = requirements;
    let preferred = critical.split_off(critical_len);
    (critical, preferred)
}

impl JobPosting {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Replaces both requirement lists using the positional 70/30 split.
    pub fn with_ordered_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (critical, preferred) =
            split_ordered_requirements(requirements.into_iter().map(Into::into).collect());
        self.critical_requirements = critical;
        self.preferred_requirements = preferred;
        self
    }

    /// All requirements, critical first, in caller order.
    pub fn requirements(&self) -> impl Iterator<Item = &String> {
        self.critical_requirements
            .iter()
            .chain(self.preferred_requirements.iter())
    }
}

#[derive(Debug, Default, Deserialize)]
struct JobPostingWire {
    #[serde(default, deserialize_with = "lenient::string")]
    id: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    requirements: Vec<String>,
    #[serde(
        default,
        alias = "criticalRequirements",
        deserialize_with = "lenient::strings"
    )]
    critical_requirements: Vec<String>,
    #[serde(
        default,
        alias = "preferredRequirements",
        deserialize_with = "lenient::strings"
    )]
    preferred_requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    technologies: Vec<String>,
    #[serde(
        default,
        alias = "experienceLevel",
        deserialize_with = "lenient::optional"
    )]
    experience_level: Option<ExperienceLevel>,
    #[serde(default, deserialize_with = "lenient::string")]
    location: String,
    #[serde(default, deserialize_with = "lenient::boolean")]
    remote: bool,
    #[serde(default, deserialize_with = "lenient::optional")]
    salary: Option<JobSalary>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    company: Option<String>,
    #[serde(default, alias = "studioType", deserialize_with = "lenient::optional")]
    studio_type: Option<StudioType>,
}

impl From<JobPostingWire> for JobPosting {
    fn from(wire: JobPostingWire) -> Self {
        let explicit =
            !wire.critical_requirements.is_empty() || !wire.preferred_requirements.is_empty();
        let (critical_requirements, preferred_requirements) = if explicit {
            (wire.critical_requirements, wire.preferred_requirements)
        } else {
            split_ordered_requirements(wire.requirements)
        };

        JobPosting {
            id: wire.id,
            critical_requirements,
            preferred_requirements,
            technologies: wire.technologies,
            experience_level: wire.experience_level,
            location: wire.location,
            remote: wire.remote,
            salary: wire.salary,
            company: wire.company,
            studio_type: wire.studio_type,
        }
    }
}
