//! Score aggregation
//!
//! Collapses a posture's indicator set into a global score, a skill level and
//! the priority indicator the practitioner should work on first. The band
//! edges used here, together with gating and visibility limits, form the
//! tunable [`QualityPolicy`].

use crate::error::QualityError;
use crate::geometry::round_tenth;
use crate::types::{ImprovementLevel, IndicatorSet, PriorityIndicator, SkillLevel};
use serde::{Deserialize, Serialize};

/// Minimum classification confidence for a report to be produced
pub const DEFAULT_GATING_THRESHOLD: f64 = 0.70;

/// Landmarks detected below this visibility are flagged as unreliable
pub const DEFAULT_MIN_VISIBILITY: f64 = 0.5;

/// Confidence multiplier lost when any angle was measured on a zero-length segment
pub const DEFAULT_DEGENERATE_PENALTY: f64 = 0.25;

/// Lower edges of the skill levels above beginner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillBands {
    pub intermediate: f64,
    pub advanced: f64,
    pub expert: f64,
}

impl Default for SkillBands {
    fn default() -> Self {
        Self {
            intermediate: 60.0,
            advanced: 80.0,
            expert: 90.0,
        }
    }
}

/// Lower edges of the improvement levels; anything below `moderate` is major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementBands {
    pub minor: f64,
    pub moderate: f64,
}

impl Default for ImprovementBands {
    fn default() -> Self {
        Self {
            minor: 85.0,
            moderate: 65.0,
        }
    }
}

/// Cross-posture tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityPolicy {
    /// Reports below this classification confidence are unavailable (0-1)
    pub gating_threshold: f64,
    /// Visibility floor for a landmark to count as reliable (0-1)
    pub min_visibility: f64,
    pub skill_bands: SkillBands,
    pub improvement_bands: ImprovementBands,
    /// Fraction of input confidence removed on degenerate geometry (0-1)
    pub degenerate_penalty: f64,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            gating_threshold: DEFAULT_GATING_THRESHOLD,
            min_visibility: DEFAULT_MIN_VISIBILITY,
            skill_bands: SkillBands::default(),
            improvement_bands: ImprovementBands::default(),
            degenerate_penalty: DEFAULT_DEGENERATE_PENALTY,
        }
    }
}

impl QualityPolicy {
    /// Reject out-of-range limits and bands that are not strictly increasing
    pub fn validate(&self) -> Result<(), QualityError> {
        for (name, value) in [
            ("gating_threshold", self.gating_threshold),
            ("min_visibility", self.min_visibility),
            ("degenerate_penalty", self.degenerate_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(QualityError::InvalidPolicy(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let skill = self.skill_bands;
        if !(0.0 < skill.intermediate
            && skill.intermediate < skill.advanced
            && skill.advanced < skill.expert
            && skill.expert <= 100.0)
        {
            return Err(QualityError::InvalidPolicy(format!(
                "skill bands must increase within (0, 100]: {} / {} / {}",
                skill.intermediate, skill.advanced, skill.expert
            )));
        }

        let improvement = self.improvement_bands;
        if !(0.0 < improvement.moderate
            && improvement.moderate < improvement.minor
            && improvement.minor <= 100.0)
        {
            return Err(QualityError::InvalidPolicy(format!(
                "improvement bands must increase within (0, 100]: {} / {}",
                improvement.moderate, improvement.minor
            )));
        }

        Ok(())
    }

    /// Load a policy from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, QualityError> {
        let policy: QualityPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_json(&self) -> Result<String, QualityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Aggregated view of an indicator set
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub global_score: f64,
    pub skill_level: SkillLevel,
    pub priority_indicator: PriorityIndicator,
}

/// Aggregator for indicator sets
pub struct Aggregator;

impl Aggregator {
    /// Aggregate `indicators` under `policy`; `None` for an empty set
    pub fn aggregate(indicators: &IndicatorSet, policy: &QualityPolicy) -> Option<Aggregate> {
        let (name, score) = Self::weakest(indicators)?;
        let global_score = Self::global_score(indicators);

        Some(Aggregate {
            global_score,
            skill_level: Self::skill_level(global_score, &policy.skill_bands),
            priority_indicator: PriorityIndicator {
                name: name.to_string(),
                score,
                improvement_needed: Self::improvement_needed(score, &policy.improvement_bands),
            },
        })
    }

    /// Arithmetic mean of the indicator scores, one decimal; 0 when empty
    pub fn global_score(indicators: &IndicatorSet) -> f64 {
        if indicators.is_empty() {
            return 0.0;
        }
        let total: f64 = indicators.scores().sum();
        round_tenth(total / indicators.len() as f64)
    }

    /// Lowest-scoring indicator; the first declared wins ties
    pub fn weakest(indicators: &IndicatorSet) -> Option<(&str, f64)> {
        indicators.iter().fold(None, |best, (name, score)| match best {
            Some((_, best_score)) if score >= best_score => best,
            _ => Some((name, score)),
        })
    }

    pub fn skill_level(global_score: f64, bands: &SkillBands) -> SkillLevel {
        if global_score >= bands.expert {
            SkillLevel::Expert
        } else if global_score >= bands.advanced {
            SkillLevel::Advanced
        } else if global_score >= bands.intermediate {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Beginner
        }
    }

    pub fn improvement_needed(score: f64, bands: &ImprovementBands) -> ImprovementLevel {
        if score >= bands.minor {
            ImprovementLevel::Minor
        } else if score >= bands.moderate {
            ImprovementLevel::Moderate
        } else {
            ImprovementLevel::Major
        }
    }
}
