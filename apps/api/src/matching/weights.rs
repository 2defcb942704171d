#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Per-dimension weights for the composite match score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
    pub culture: f64,
    pub technology: f64,
}

pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    skills: 0.35,
    experience: 0.25,
    location: 0.15,
    salary: 0.10,
    culture: 0.10,
    technology: 0.05,
};

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.salary + self.culture + self.technology
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_skills_carry_the_most_weight() {
        let w = MatchWeights::default();
        for other in [w.experience, w.location, w.salary, w.culture, w.technology] {
            assert!(w.skills > other);
        }
    }
}
