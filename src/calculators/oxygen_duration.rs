//! Remaining oxygen volume and run time for a cylinder at a given
//! gauge pressure and flow rate. Tank presets come from the reference
//! table; explicit capacity/service pressure override them.

use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_positive, round_to, CalculatorError};
use crate::reference::tanks;

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Standard service pressure for portable and stationary cylinders.
const DEFAULT_SERVICE_PRESSURE_PSI: f64 = 2200.0;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct OxygenDurationInput {
    /// Cylinder size letter (D, E, M, G, H, K); fills capacity and
    /// service pressure from the reference table.
    pub tank: Option<String>,
    pub capacity_liters: Option<f64>,
    pub service_pressure_psi: Option<f64>,
    pub current_pressure_psi: f64,
    pub flow_lpm: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OxygenDurationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank: Option<String>,
    pub remaining_liters: f64,
    pub remaining_minutes: f64,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// Remaining volume = (gauge / service pressure) × capacity;
/// run time = volume / flow.
pub fn compute(input: &OxygenDurationInput) -> Result<OxygenDurationResult, CalculatorError> {
    let preset = match &input.tank {
        Some(size) => Some(tanks::find_tank(size).ok_or_else(|| {
            CalculatorError::new("tank", format!("unknown tank size: {size}"))
        })?),
        None => None,
    };

    let capacity = input
        .capacity_liters
        .or(preset.map(|t| t.capacity_liters))
        .ok_or_else(|| {
            CalculatorError::new("capacity_liters", "required when no tank size is given")
        })?;
    let service = input
        .service_pressure_psi
        .or(preset.map(|t| t.service_pressure_psi))
        .unwrap_or(DEFAULT_SERVICE_PRESSURE_PSI);

    check_positive("capacity_liters", capacity)?;
    check_positive("service_pressure_psi", service)?;
    check_non_negative("current_pressure_psi", input.current_pressure_psi)?;
    check_positive("flow_lpm", input.flow_lpm)?;

    let remaining_liters = (input.current_pressure_psi / service) * capacity;
    let remaining_minutes = remaining_liters / input.flow_lpm;

    Ok(OxygenDurationResult {
        tank: preset.map(|t| t.size.to_string()),
        remaining_liters: round_to(remaining_liters, 1),
        remaining_minutes: round_to(remaining_minutes, 1),
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
