//! Cardiac output and derived hemodynamic indices from heart rate and
//! stroke volume. Indices use an assumed average body surface area.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Assumed average adult body surface area (m²) for index calculations.
const BODY_SURFACE_AREA_M2: f64 = 1.7;

const NORMAL_CO_MIN: f64 = 4.0;
const NORMAL_CO_MAX: f64 = 8.0;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CardiacOutputInput {
    pub heart_rate: f64,
    pub stroke_volume_ml: f64,
    /// Optional; mean arterial pressure is reported only when both are given.
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardiacOutputResult {
    /// L/min.
    pub cardiac_output: f64,
    /// L/min/m².
    pub cardiac_index: f64,
    /// mL/m².
    pub stroke_volume_index: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_arterial_pressure: Option<f64>,
    pub category: String,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// CO = HR × SV / 1000; CI = CO / BSA; SVI = SV / BSA;
/// MAP = (SBP + 2 × DBP) / 3 when pressures are supplied.
pub fn compute(input: &CardiacOutputInput) -> Result<CardiacOutputResult, CalculatorError> {
    check_positive("heart_rate", input.heart_rate)?;
    check_positive("stroke_volume_ml", input.stroke_volume_ml)?;
    if let Some(sbp) = input.systolic_bp {
        check_positive("systolic_bp", sbp)?;
    }
    if let Some(dbp) = input.diastolic_bp {
        check_positive("diastolic_bp", dbp)?;
    }

    let cardiac_output = input.heart_rate * input.stroke_volume_ml / 1000.0;
    let cardiac_index = cardiac_output / BODY_SURFACE_AREA_M2;
    let stroke_volume_index = input.stroke_volume_ml / BODY_SURFACE_AREA_M2;

    let mean_arterial_pressure = match (input.systolic_bp, input.diastolic_bp) {
        (Some(sbp), Some(dbp)) => Some(round_to((sbp + 2.0 * dbp) / 3.0, 0)),
        _ => None,
    };

    let category = if cardiac_output < NORMAL_CO_MIN {
        "Low"
    } else if cardiac_output <= NORMAL_CO_MAX {
        "Normal"
    } else {
        "High"
    };

    Ok(CardiacOutputResult {
        cardiac_output: round_to(cardiac_output, 2),
        cardiac_index: round_to(cardiac_index, 2),
        stroke_volume_index: round_to(stroke_volume_index, 0),
        mean_arterial_pressure,
        category: category.to_string(),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_adult_is_normal() {
        let result = compute(&CardiacOutputInput {
            heart_rate: 70.0,
            stroke_volume_ml: 70.0,
            systolic_bp: Some(120.0),
            diastolic_bp: Some(80.0),
        })
        .unwrap();
        assert_eq!(result.cardiac_output, 4.9);
        assert_eq!(result.cardiac_index, 2.88);
        assert_eq!(result.stroke_volume_index, 41.0);
        assert_eq!(result.mean_arterial_pressure, Some(93.0));
        assert_eq!(result.category, "Normal");
    }

    #[test]
    fn low_output_flagged() {
        let result = compute(&CardiacOutputInput {
            heart_rate: 50.0,
            stroke_volume_ml: 40.0,
            systolic_bp: None,
            diastolic_bp: None,
        })
        .unwrap();
        assert_eq!(result.cardiac_output, 2.0);
        assert_eq!(result.category, "Low");
        assert!(result.mean_arterial_pressure.is_none());
    }

    #[test]
    fn high_output_flagged() {
        let result = compute(&CardiacOutputInput {
            heart_rate: 120.0,
            stroke_volume_ml: 90.0,
            systolic_bp: None,
            diastolic_bp: None,
        })
        .unwrap();
        assert_eq!(result.cardiac_output, 10.8);
        assert_eq!(result.category, "High");
    }

    #[test]
    fn map_needs_both_pressures() {
        let result = compute(&CardiacOutputInput {
            heart_rate: 70.0,
            stroke_volume_ml: 70.0,
            systolic_bp: Some(120.0),
            diastolic_bp: None,
        })
        .unwrap();
        assert!(result.mean_arterial_pressure.is_none());
    }

    #[test]
    fn rejects_zero_heart_rate() {
        let err = compute(&CardiacOutputInput {
            heart_rate: 0.0,
            stroke_volume_ml: 70.0,
            systolic_bp: None,
            diastolic_bp: None,
        })
        .unwrap_err();
        assert_eq!(err.field, "heart_rate");
    }
}
