//! Weight-based dosage range guidance.
//!
//! Multipliers are harm-reduction heuristics, not pharmacology.

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, ValidationError};
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// Upper bound applied to the high end of every range, in mg.
pub const MAX_RECOMMENDED_MG: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceLevel {
    #[serde(rename = "first")]
    FirstTime,
    #[default]
    Beginner,
    Experienced,
}

impl ExperienceLevel {
    /// Parse a picker tag. Anything unrecognized falls back to `Beginner`.
    pub fn from_tag(tag: &str) -> ExperienceLevel {
        match tag.trim().to_ascii_lowercase().as_str() {
            "first" | "first_time" | "first-time" => ExperienceLevel::FirstTime,
            "experienced" => ExperienceLevel::Experienced,
            _ => ExperienceLevel::Beginner,
        }
    }

    pub fn multipliers(&self) -> (f64, f64) {
        match self {
            ExperienceLevel::FirstTime => (0.8, 1.0),
            ExperienceLevel::Beginner => (1.0, 1.3),
            ExperienceLevel::Experienced => (1.2, 1.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageRange {
    pub low_mg: f64,
    pub high_mg: f64,
}

impl DosageRange {
    /// The cap only touches the high bound, so heavy inputs can leave
    /// `low_mg` above `high_mg`. Callers should surface this instead of
    /// showing the range as-is.
    pub fn is_inverted(&self) -> bool {
        self.low_mg > self.high_mg
    }

    pub fn is_capped(&self) -> bool {
        self.high_mg >= MAX_RECOMMENDED_MG
    }
}

pub fn estimate_range(weight_kg: f64, experience: ExperienceLevel) -> DosageRange {
    let (low_multiplier, high_multiplier) = experience.multipliers();
    let low_mg = weight_kg * low_multiplier;
    let high_mg = (weight_kg * high_multiplier).min(MAX_RECOMMENDED_MG);

    let range = DosageRange { low_mg, high_mg };
    if range.is_inverted() {
        log_warn!(
            "dosage range inverted for {weight_kg} kg ({experience:?}): low {low_mg:.1} mg exceeds capped high {high_mg:.1} mg"
        );
    }
    range
}

/// [`estimate_range`] with the weight checked first.
pub fn estimate_range_checked(
    weight_kg: f64,
    experience: ExperienceLevel,
) -> Result<DosageRange, ValidationError> {
    let weight = require_finite("weightKg", weight_kg)?;
    if weight <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: "weightKg",
            value: weight,
        });
    }
    Ok(estimate_range(weight, experience))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_range(range: DosageRange, low: f64, high: f64) {
        assert!((range.low_mg - low).abs() < 1e-9, "low {} != {low}", range.low_mg);
        assert!((range.high_mg - high).abs() < 1e-9, "high {} != {high}", range.high_mg);
    }

    #[test]
    fn ranges_for_seventy_kilos() {
        assert_range(estimate_range(70.0, ExperienceLevel::FirstTime), 56.0, 70.0);
        assert_range(estimate_range(70.0, ExperienceLevel::Beginner), 70.0, 91.0);
        assert_range(estimate_range(70.0, ExperienceLevel::Experienced), 84.0, 105.0);
    }

    #[test]
    fn high_bound_is_capped_low_is_not() {
        let range = estimate_range(120.0, ExperienceLevel::Experienced);
        assert_range(range, 144.0, 150.0);
        assert!(range.is_capped());
        assert!(!range.is_inverted());

        let heavy = estimate_range(130.0, ExperienceLevel::Experienced);
        assert_range(heavy, 156.0, 150.0);
        assert!(heavy.is_inverted());
    }

    #[test]
    fn unrecognized_tag_behaves_like_beginner() {
        assert_eq!(ExperienceLevel::from_tag("veteran"), ExperienceLevel::Beginner);
        assert_eq!(ExperienceLevel::from_tag("first"), ExperienceLevel::FirstTime);
        assert_eq!(ExperienceLevel::from_tag("Experienced"), ExperienceLevel::Experienced);
        assert_eq!(
            estimate_range(70.0, ExperienceLevel::from_tag("")),
            estimate_range(70.0, ExperienceLevel::Beginner)
        );
    }

    #[test]
    fn checked_estimate_rejects_bad_weight() {
        assert_eq!(
            estimate_range_checked(0.0, ExperienceLevel::Beginner).unwrap_err().field(),
            "weightKg"
        );
        assert!(estimate_range_checked(f64::NAN, ExperienceLevel::Beginner).is_err());
        assert!(estimate_range_checked(60.0, ExperienceLevel::Beginner).is_ok());
    }

    #[test]
    fn experience_tags_in_json() {
        assert_eq!(serde_json::to_string(&ExperienceLevel::FirstTime).unwrap(), "\"first\"");
        assert_eq!(
            serde_json::from_str::<ExperienceLevel>("\"experienced\"").unwrap(),
            ExperienceLevel::Experienced
        );
    }
}
