//! APGAR newborn assessment: five criteria scored 0–2 at one and
//! five minutes after birth.

use serde::{Deserialize, Serialize};

use super::CalculatorError;

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

const MAX_CRITERION_SCORE: u8 = 2;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ApgarInput {
    /// Skin color.
    pub appearance: u8,
    /// Heart rate.
    pub pulse: u8,
    /// Reflex irritability.
    pub grimace: u8,
    /// Muscle tone.
    pub activity: u8,
    /// Respiratory effort.
    pub respiration: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApgarResult {
    pub total: u8,
    pub interpretation: String,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

pub fn compute(input: &ApgarInput) -> Result<ApgarResult, CalculatorError> {
    let criteria: [(&'static str, u8); 5] = [
        ("appearance", input.appearance),
        ("pulse", input.pulse),
        ("grimace", input.grimace),
        ("activity", input.activity),
        ("respiration", input.respiration),
    ];

    let mut total = 0u8;
    for (name, score) in criteria {
        if score > MAX_CRITERION_SCORE {
            return Err(CalculatorError::new(name, "must be between 0 and 2"));
        }
        total += score;
    }

    let interpretation = if total >= 8 {
        "Normal"
    } else if total >= 4 {
        "Moderately Abnormal"
    } else {
        "Severely Abnormal"
    };

    Ok(ApgarResult {
        total,
        interpretation: interpretation.to_string(),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
