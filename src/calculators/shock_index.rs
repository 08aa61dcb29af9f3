//! Shock index: heart rate over systolic blood pressure.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ShockIndexInput {
    pub heart_rate: f64,
    pub systolic_bp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShockIndexResult {
    pub shock_index: f64,
    pub category: String,
    pub interpretation: String,
    pub recommendations: Vec<&'static str>,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

pub fn compute(input: &ShockIndexInput) -> Result<ShockIndexResult, CalculatorError> {
    check_positive("heart_rate", input.heart_rate)?;
    check_positive("systolic_bp", input.systolic_bp)?;

    let shock_index = input.heart_rate / input.systolic_bp;

    let (category, interpretation, recommendations) = if shock_index < 0.6 {
        (
            "Normal",
            "Normal - No significant shock",
            vec![
                "Continue routine monitoring",
                "Maintain current treatment plan",
                "Reassess vital signs regularly",
            ],
        )
    } else if shock_index < 0.8 {
        (
            "Mild",
            "Mild shock - Early compensated stage",
            vec![
                "Increase monitoring frequency",
                "Evaluate for underlying causes",
                "Consider fluid resuscitation",
                "Prepare for potential deterioration",
            ],
        )
    } else if shock_index < 1.0 {
        (
            "Moderate",
            "Moderate shock - Compensated stage",
            vec![
                "Initiate aggressive fluid resuscitation",
                "Consider blood products if hemorrhagic",
                "Frequent vital sign monitoring",
                "Prepare for advanced interventions",
            ],
        )
    } else {
        (
            "Severe",
            "Severe shock - Decompensated stage",
            vec![
                "Immediate aggressive resuscitation",
                "Consider vasopressors",
                "Blood product administration",
                "Urgent surgical consultation if trauma",
                "Continuous monitoring required",
            ],
        )
    };

    Ok(ShockIndexResult {
        shock_index: round_to(shock_index, 2),
        category: category.to_string(),
        interpretation: interpretation.to_string(),
        recommendations,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn input(heart_rate: f64, systolic_bp: f64) -> ShockIndexInput {
        ShockIndexInput {
            heart_rate,
            systolic_bp,
        }
    }

    #[test]
    fn resting_vitals_are_normal() {
        let result = compute(&input(70.0, 120.0)).unwrap();
        assert_eq!(result.shock_index, 0.58);
        assert_eq!(result.category, "Normal");
    }

    #[test]
    fn ratio_of_one_is_severe() {
        let result = compute(&input(110.0, 110.0)).unwrap();
        assert_eq!(result.shock_index, 1.0);
        assert_eq!(result.category, "Severe");
        assert!(result
            .recommendations
            .contains(&"Immediate aggressive resuscitation"));
    }

    #[test]
    fn band_boundaries() {
        // Raw ratio decides the band before display rounding.
        assert_eq!(compute(&input(60.0, 100.0)).unwrap().category, "Mild");
        assert_eq!(compute(&input(80.0, 100.0)).unwrap().category, "Moderate");
        assert_eq!(compute(&input(79.0, 100.0)).unwrap().category, "Mild");
        assert_eq!(compute(&input(99.0, 100.0)).unwrap().category, "Moderate");
    }

    #[test]
    fn tachycardic_hypotensive_patient_is_severe() {
        let result = compute(&input(130.0, 85.0)).unwrap();
        assert_eq!(result.shock_index, 1.53);
        assert_eq!(result.category, "Severe");
        assert_eq!(result.interpretation, "Severe shock - Decompensated stage");
    }

    #[test]
    fn zero_pressure_rejected() {
        let err = compute(&input(80.0, 0.0)).unwrap_err();
        assert_eq!(err.field, "systolic_bp");
    }
}
