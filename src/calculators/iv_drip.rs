//! IV drip rate from volume, infusion time, and administration-set
//! drop factor.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Drop factors of standard (10/15/20) and micro-drip (60) sets, gtt/mL.
const DROP_FACTORS: [u32; 4] = [10, 15, 20, 60];

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Minutes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IvDripInput {
    pub volume_ml: f64,
    pub time: f64,
    pub time_unit: TimeUnit,
    /// gtt/mL; one of 10, 15, 20, 60.
    pub drop_factor: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct IvDripResult {
    pub drops_per_minute: f64,
    /// mL/min.
    pub flow_rate: f64,
    /// mL/hr.
    pub infusion_rate: f64,
    pub total_minutes: f64,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// drops/min = volume × drop factor / minutes.
pub fn compute(input: &IvDripInput) -> Result<IvDripResult, CalculatorError> {
    check_positive("volume_ml", input.volume_ml)?;
    check_positive("time", input.time)?;
    if !DROP_FACTORS.contains(&input.drop_factor) {
        return Err(CalculatorError::new(
            "drop_factor",
            "must be one of 10, 15, 20, or 60 gtt/mL",
        ));
    }

    let (minutes, hours) = match input.time_unit {
        TimeUnit::Hours => (input.time * 60.0, input.time),
        TimeUnit::Minutes => (input.time, input.time / 60.0),
    };

    let flow_rate = input.volume_ml / minutes;
    let drops_per_minute = (input.volume_ml * f64::from(input.drop_factor) / minutes).round();
    let infusion_rate = (input.volume_ml / hours).round();

    Ok(IvDripResult {
        drops_per_minute,
        flow_rate: round_to(flow_rate, 2),
        infusion_rate,
        total_minutes: minutes,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liter_over_eight_hours() {
        let result = compute(&IvDripInput {
            volume_ml: 1000.0,
            time: 8.0,
            time_unit: TimeUnit::Hours,
            drop_factor: 15,
        })
        .unwrap();
        // 1000 × 15 / 480 = 31.25 → 31 gtt/min
        assert_eq!(result.drops_per_minute, 31.0);
        assert_eq!(result.flow_rate, 2.08);
        assert_eq!(result.infusion_rate, 125.0);
        assert_eq!(result.total_minutes, 480.0);
    }

    #[test]
    fn minutes_equal_hours_input() {
        let hours = compute(&IvDripInput {
            volume_ml: 500.0,
            time: 2.0,
            time_unit: TimeUnit::Hours,
            drop_factor: 20,
        })
        .unwrap();
        let minutes = compute(&IvDripInput {
            volume_ml: 500.0,
            time: 120.0,
            time_unit: TimeUnit::Minutes,
            drop_factor: 20,
        })
        .unwrap();
        assert_eq!(hours.drops_per_minute, minutes.drops_per_minute);
        assert_eq!(hours.infusion_rate, minutes.infusion_rate);
    }

    #[test]
    fn micro_drip_multiplies_drops() {
        let result = compute(&IvDripInput {
            volume_ml: 100.0,
            time: 60.0,
            time_unit: TimeUnit::Minutes,
            drop_factor: 60,
        })
        .unwrap();
        // Micro-drip: gtt/min equals mL/hr.
        assert_eq!(result.drops_per_minute, 100.0);
        assert_eq!(result.infusion_rate, 100.0);
    }

    #[test]
    fn unsupported_drop_factor_rejected() {
        let err = compute(&IvDripInput {
            volume_ml: 1000.0,
            time: 8.0,
            time_unit: TimeUnit::Hours,
            drop_factor: 12,
        })
        .unwrap_err();
        assert_eq!(err.field, "drop_factor");
    }

    #[test]
    fn zero_volume_rejected() {
        let err = compute(&IvDripInput {
            volume_ml: 0.0,
            time: 8.0,
            time_unit: TimeUnit::Hours,
            drop_factor: 15,
        })
        .unwrap_err();
        assert_eq!(err.field, "volume_ml");
    }
}
