//! Glasgow Coma Scale: eye, verbal, and motor responses.

use serde::{Deserialize, Serialize};

use super::CalculatorError;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct GlasgowComaInput {
    /// Eye opening response, 1–4.
    pub eye: u8,
    /// Verbal response, 1–5.
    pub verbal: u8,
    /// Motor response, 1–6.
    pub motor: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlasgowComaResult {
    /// Total score, 3–15.
    pub total: u8,
    pub severity: String,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

pub fn compute(input: &GlasgowComaInput) -> Result<GlasgowComaResult, CalculatorError> {
    let components: [(&'static str, u8, u8); 3] = [
        ("eye", input.eye, 4),
        ("verbal", input.verbal, 5),
        ("motor", input.motor, 6),
    ];

    let mut total = 0u8;
    for (name, score, max) in components {
        if score < 1 || score > max {
            return Err(CalculatorError::new(
                name,
                format!("must be between 1 and {max}"),
            ));
        }
        total += score;
    }

    let severity = if total >= 13 {
        "Mild"
    } else if total >= 9 {
        "Moderate"
    } else {
        "Severe"
    };

    Ok(GlasgowComaResult {
        total,
        severity: severity.to_string(),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
