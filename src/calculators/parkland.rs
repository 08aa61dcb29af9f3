//! Parkland formula: 24-hour crystalloid volume for burn resuscitation.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Lactated Ringer's per kilogram per percent TBSA burned over 24 h.
const ML_PER_KG_PER_PERCENT: f64 = 4.0;

const FIRST_PERIOD_HOURS: f64 = 8.0;
const SECOND_PERIOD_HOURS: f64 = 16.0;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ParklandInput {
    pub weight_kg: f64,
    /// Percent of total body surface area burned (0–100).
    pub burn_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParklandResult {
    pub total_ml: f64,
    /// Half the total, given over the first 8 hours from time of burn.
    pub first_8h_ml: f64,
    /// Remaining half over the following 16 hours.
    pub next_16h_ml: f64,
    pub first_8h_rate_ml_hr: f64,
    pub next_16h_rate_ml_hr: f64,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// Total = 4 mL × weight (kg) × %TBSA, split half/half over 8 h and 16 h.
pub fn compute(input: &ParklandInput) -> Result<ParklandResult, CalculatorError> {
    check_positive("weight_kg", input.weight_kg)?;
    if !input.burn_percentage.is_finite()
        || input.burn_percentage <= 0.0
        || input.burn_percentage > 100.0
    {
        return Err(CalculatorError::new(
            "burn_percentage",
            "must be between 0 and 100",
        ));
    }

    let total = ML_PER_KG_PER_PERCENT * input.weight_kg * input.burn_percentage;
    let half = total / 2.0;

    Ok(ParklandResult {
        total_ml: round_to(total, 1),
        first_8h_ml: round_to(half, 1),
        next_16h_ml: round_to(half, 1),
        first_8h_rate_ml_hr: round_to(half / FIRST_PERIOD_HOURS, 1),
        next_16h_rate_ml_hr: round_to(half / SECOND_PERIOD_HOURS, 1),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_percent_seventy_kg() {
        let result = compute(&ParklandInput {
            weight_kg: 70.0,
            burn_percentage: 30.0,
        })
        .unwrap();
        assert_eq!(result.total_ml, 8400.0);
        assert_eq!(result.first_8h_ml, 4200.0);
        assert_eq!(result.next_16h_ml, 4200.0);
        assert_eq!(result.first_8h_rate_ml_hr, 525.0);
        assert_eq!(result.next_16h_rate_ml_hr, 262.5);
    }

    #[test]
    fn periods_split_total_evenly() {
        let result = compute(&ParklandInput {
            weight_kg: 55.0,
            burn_percentage: 18.0,
        })
        .unwrap();
        assert_eq!(result.first_8h_ml + result.next_16h_ml, result.total_ml);
    }

    #[test]
    fn rejects_zero_weight() {
        let err = compute(&ParklandInput {
            weight_kg: 0.0,
            burn_percentage: 30.0,
        })
        .unwrap_err();
        assert_eq!(err.field, "weight_kg");
    }

    #[test]
    fn rejects_burn_percentage_out_of_range() {
        for pct in [0.0, -5.0, 101.0] {
            let err = compute(&ParklandInput {
                weight_kg: 70.0,
                burn_percentage: pct,
            })
            .unwrap_err();
            assert_eq!(err.field, "burn_percentage");
        }
    }

    #[test]
    fn full_body_burn_accepted() {
        let result = compute(&ParklandInput {
            weight_kg: 80.0,
            burn_percentage: 100.0,
        })
        .unwrap();
        assert_eq!(result.total_ml, 32000.0);
    }
}
