//! Rule-of-Nines burn surface estimation.
//!
//! Per-region percentages are validated against the age group's regional
//! maxima; children and infants carry proportionally larger heads and
//! smaller legs than adults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{round_to, CalculatorError};
use crate::models::BurnAgeGroup;

// ═══════════════════════════════════════════
// Region maxima
// ═══════════════════════════════════════════

/// Maximum body-surface percentage per region for an age group.
pub fn region_maxima(age_group: BurnAgeGroup) -> [(&'static str, f64); 9] {
    let (head, leg) = match age_group {
        BurnAgeGroup::Adult => (9.0, 18.0),
        BurnAgeGroup::Child | BurnAgeGroup::Infant => (18.0, 14.0),
    };
    [
        ("head", head),
        ("chest", 9.0),
        ("abdomen", 9.0),
        ("back", 18.0),
        ("left_arm", 9.0),
        ("right_arm", 9.0),
        ("left_leg", leg),
        ("right_leg", leg),
        ("genitals", 1.0),
    ]
}

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// Burned percentage per body region; unlisted regions default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BurnRegions {
    pub head: f64,
    pub chest: f64,
    pub abdomen: f64,
    pub back: f64,
    pub left_arm: f64,
    pub right_arm: f64,
    pub left_leg: f64,
    pub right_leg: f64,
    pub genitals: f64,
}

impl BurnRegions {
    fn values(&self) -> [(&'static str, f64); 9] {
        [
            ("head", self.head),
            ("chest", self.chest),
            ("abdomen", self.abdomen),
            ("back", self.back),
            ("left_arm", self.left_arm),
            ("right_arm", self.right_arm),
            ("left_leg", self.left_leg),
            ("right_leg", self.right_leg),
            ("genitals", self.genitals),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BurnSurfaceInput {
    /// One of `adult`, `child`, `infant`.
    pub age_group: String,
    pub regions: BurnRegions,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurnSurfaceResult {
    pub total_percentage: f64,
    pub severity: String,
    pub age_group: String,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// Total burned surface and severity classification.
pub fn compute(input: &BurnSurfaceInput) -> Result<BurnSurfaceResult, CalculatorError> {
    let age_group = BurnAgeGroup::from_str(&input.age_group).map_err(|_| {
        CalculatorError::new("age_group", format!("unknown age group: {}", input.age_group))
    })?;

    let maxima = region_maxima(age_group);
    let mut total = 0.0;
    for (&(name, value), &(_, max)) in input.regions.values().iter().zip(maxima.iter()) {
        if !value.is_finite() || value < 0.0 {
            return Err(CalculatorError::new(name, "must be zero or more"));
        }
        if value > max {
            return Err(CalculatorError::new(
                name,
                format!("exceeds the {max}% maximum for this region"),
            ));
        }
        total += value;
    }

    let severity = if total < 10.0 {
        "Minor"
    } else if total < 20.0 {
        "Moderate"
    } else if total < 30.0 {
        "Major"
    } else {
        "Critical"
    };

    Ok(BurnSurfaceResult {
        total_percentage: round_to(total, 1),
        severity: severity.to_string(),
        age_group: age_group.as_str().to_string(),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
