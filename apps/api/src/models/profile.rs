#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStyle {
    #[serde(alias = "Remote")]
    Remote,
    #[serde(alias = "Hybrid")]
    Hybrid,
    #[serde(alias = "Onsite", alias = "on-site", alias = "office")]
    Onsite,
}

/// A salary band. A missing or inverted `max` collapses to `min`.
///
/// Decoding needs at least one usable bound: an object with neither `min`
/// nor `max` (e.g. `{}` or `{"currency": "USD"}`) is rejected, so callers
/// using [`lenient::optional`] see it as absent rather than a zero band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "SalaryRangeWire")]
pub struct SalaryRange {
    pub min: f64,
    pub max: Option<f64>,
}

#[derive(Deserialize)]
struct SalaryRangeWire {
    #[serde(default, deserialize_with = "lenient::optional_number")]
    min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    max: Option<f64>,
}

impl TryFrom<SalaryRangeWire> for SalaryRange {
    type Error = String;

    fn try_from(wire: SalaryRangeWire) -> Result<Self, Self::Error> {
        // A max-only band is a single point at max.
        match (wire.min, wire.max) {
            (Some(min), max) => Ok(SalaryRange { min, max }),
            (None, Some(max)) => Ok(SalaryRange { min: max, max: None }),
            (None, None) => Err("salary range needs a numeric min or max".to_string()),
        }
    }
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Returns `(min, max)` with `max` clamped to at least `min`.
    pub fn bounds(&self) -> (f64, f64) {
        let max = self.max.unwrap_or(self.min).max(self.min);
        (self.min, max)
    }
}

/// The candidate side of a match. Owned by the caller; never mutated by scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    #[serde(
        default,
        alias = "experienceYears",
        deserialize_with = "lenient::number"
    )]
    pub experience_years: f64,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
    #[serde(
        default,
        alias = "salaryExpectation",
        deserialize_with = "lenient::optional"
    )]
    pub salary_expectation: Option<SalaryRange>,
    #[serde(default, alias = "workStyle", deserialize_with = "lenient::optional")]
    pub work_style: Option<WorkStyle>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub technologies: Vec<String>,
}
