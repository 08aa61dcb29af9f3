//! Mean arterial pressure from a blood pressure reading.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct MapInput {
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapResult {
    pub map: f64,
    pub category: String,
    pub interpretation: String,
    pub recommendations: Vec<&'static str>,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// MAP = DBP + (SBP − DBP) / 3.
pub fn compute(input: &MapInput) -> Result<MapResult, CalculatorError> {
    check_positive("systolic_bp", input.systolic_bp)?;
    check_positive("diastolic_bp", input.diastolic_bp)?;
    if input.systolic_bp < input.diastolic_bp {
        return Err(CalculatorError::new(
            "systolic_bp",
            "must be at least the diastolic pressure",
        ));
    }

    let map = input.diastolic_bp + (input.systolic_bp - input.diastolic_bp) / 3.0;

    let (category, interpretation, recommendations) = if map < 60.0 {
        (
            "Hypotensive",
            "Hypotensive - Risk of organ hypoperfusion",
            vec![
                "Immediate intervention required",
                "Assess for shock causes",
                "Consider fluid resuscitation",
                "Monitor urine output",
                "Evaluate for vasopressor need",
            ],
        )
    } else if map <= 100.0 {
        (
            "Normal",
            "Normal - Adequate organ perfusion",
            vec![
                "Continue current monitoring",
                "Maintain current treatment",
                "Regular vital sign assessment",
                "Monitor for changes",
            ],
        )
    } else {
        (
            "Hypertensive",
            "Hypertensive - Elevated perfusion pressure",
            vec![
                "Assess for hypertensive emergency",
                "Monitor for end-organ damage",
                "Consider antihypertensive therapy",
                "Neurological assessment",
                "Cardiovascular evaluation",
            ],
        )
    };

    Ok(MapResult {
        map: round_to(map, 1),
        category: category.to_string(),
        interpretation: interpretation.to_string(),
        recommendations,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
