//! Body mass index from metric or imperial measurements, with the
//! healthy weight range for the patient's height.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

const KG_PER_LB: f64 = 0.453592;
const LB_PER_KG: f64 = 2.20462;
const METERS_PER_INCH: f64 = 0.0254;

/// Healthy BMI band used for the weight-range suggestion.
const HEALTHY_BMI_MIN: f64 = 18.5;
const HEALTHY_BMI_MAX: f64 = 24.9;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BmiInput {
    pub unit: UnitSystem,
    /// Kilograms (metric) or pounds (imperial).
    pub weight: f64,
    /// Metric height; required when `unit` is metric.
    pub height_cm: Option<f64>,
    /// Imperial height; feet required when `unit` is imperial.
    pub height_feet: Option<f64>,
    pub height_inches: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: String,
    /// Healthy range (BMI 18.5–24.9) in the input's weight unit.
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
    pub weight_unit: String,
    /// Set when the BMI is at or above the overweight threshold.
    pub weight_to_lose: Option<f64>,
    /// Set when the BMI is below the underweight threshold.
    pub weight_to_gain: Option<f64>,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// BMI = weight (kg) / height (m)².
pub fn compute(input: &BmiInput) -> Result<BmiResult, CalculatorError> {
    check_positive("weight", input.weight)?;

    let (weight_kg, height_m, weight_unit) = match input.unit {
        UnitSystem::Metric => {
            let cm = input
                .height_cm
                .ok_or_else(|| CalculatorError::new("height_cm", "required for metric input"))?;
            check_positive("height_cm", cm)?;
            (input.weight, cm / 100.0, "kg")
        }
        UnitSystem::Imperial => {
            let feet = input
                .height_feet
                .ok_or_else(|| CalculatorError::new("height_feet", "required for imperial input"))?;
            let inches = input.height_inches.unwrap_or(0.0);
            if !feet.is_finite() || feet < 0.0 {
                return Err(CalculatorError::new("height_feet", "must be zero or more"));
            }
            if !inches.is_finite() || inches < 0.0 {
                return Err(CalculatorError::new("height_inches", "must be zero or more"));
            }
            let total_inches = feet * 12.0 + inches;
            if total_inches <= 0.0 {
                return Err(CalculatorError::new("height_feet", "height must be positive"));
            }
            (input.weight * KG_PER_LB, total_inches * METERS_PER_INCH, "lb")
        }
    };

    let bmi = weight_kg / (height_m * height_m);
    let category = if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    };

    let min_kg = HEALTHY_BMI_MIN * height_m * height_m;
    let max_kg = HEALTHY_BMI_MAX * height_m * height_m;
    let in_input_unit = |kg: f64| match input.unit {
        UnitSystem::Metric => round_to(kg, 1),
        UnitSystem::Imperial => round_to(kg * LB_PER_KG, 1),
    };

    Ok(BmiResult {
        bmi: round_to(bmi, 1),
        category: category.to_string(),
        healthy_weight_min: in_input_unit(min_kg),
        healthy_weight_max: in_input_unit(max_kg),
        weight_unit: weight_unit.to_string(),
        weight_to_lose: (bmi >= 25.0).then(|| in_input_unit(weight_kg - max_kg)),
        weight_to_gain: (bmi < 18.5).then(|| in_input_unit(min_kg - weight_kg)),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
