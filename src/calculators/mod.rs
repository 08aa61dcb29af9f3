//! Clinical formula library.
//!
//! Pure, stateless calculators: identical inputs always produce identical
//! outputs, and bad input is refused with a field-level error, never a NaN.
//! Each module owns its input/result types; `CalculatorRequest` and
//! `CalculatorResponse` tag them by kind for the compute endpoint.

pub mod anion_gap;
pub mod apgar;
pub mod bmi;
pub mod burn_surface;
pub mod cardiac_output;
pub mod glasgow_coma;
pub mod iv_drip;
pub mod mean_arterial_pressure;
pub mod minute_ventilation;
pub mod oxygen_duration;
pub mod parkland;
pub mod shock_index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// Input validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct CalculatorError {
    pub field: &'static str,
    pub message: String,
}

impl CalculatorError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Tagged compute request: `{"calculator": "<kind>", ...inputs}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    Bmi(bmi::BmiInput),
    BurnSurface(burn_surface::BurnSurfaceInput),
    Parkland(parkland::ParklandInput),
    OxygenDuration(oxygen_duration::OxygenDurationInput),
    Apgar(apgar::ApgarInput),
    GlasgowComa(glasgow_coma::GlasgowComaInput),
    CardiacOutput(cardiac_output::CardiacOutputInput),
    AnionGap(anion_gap::AnionGapInput),
    IvDrip(iv_drip::IvDripInput),
    MeanArterialPressure(mean_arterial_pressure::MapInput),
    MinuteVentilation(minute_ventilation::MinuteVentilationInput),
    ShockIndex(shock_index::ShockIndexInput),
}

/// Tagged compute response, mirroring the request kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorResponse {
    Bmi(bmi::BmiResult),
    BurnSurface(burn_surface::BurnSurfaceResult),
    Parkland(parkland::ParklandResult),
    OxygenDuration(oxygen_duration::OxygenDurationResult),
    Apgar(apgar::ApgarResult),
    GlasgowComa(glasgow_coma::GlasgowComaResult),
    CardiacOutput(cardiac_output::CardiacOutputResult),
    AnionGap(anion_gap::AnionGapResult),
    IvDrip(iv_drip::IvDripResult),
    MeanArterialPressure(mean_arterial_pressure::MapResult),
    MinuteVentilation(minute_ventilation::MinuteVentilationResult),
    ShockIndex(shock_index::ShockIndexResult),
}

/// Calculator kinds accepted as the `calculator` tag, in display order.
pub const KINDS: &[&str] = &[
    "bmi",
    "burn_surface",
    "parkland",
    "oxygen_duration",
    "apgar",
    "glasgow_coma",
    "cardiac_output",
    "anion_gap",
    "iv_drip",
    "mean_arterial_pressure",
    "minute_ventilation",
    "shock_index",
];

// ═══════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════

/// Run the calculator named by the request tag.
pub fn compute(request: CalculatorRequest) -> Result<CalculatorResponse, CalculatorError> {
    match request {
        CalculatorRequest::Bmi(input) => bmi::compute(&input).map(CalculatorResponse::Bmi),
        CalculatorRequest::BurnSurface(input) => {
            burn_surface::compute(&input).map(CalculatorResponse::BurnSurface)
        }
        CalculatorRequest::Parkland(input) => {
            parkland::compute(&input).map(CalculatorResponse::Parkland)
        }
        CalculatorRequest::OxygenDuration(input) => {
            oxygen_duration::compute(&input).map(CalculatorResponse::OxygenDuration)
        }
        CalculatorRequest::Apgar(input) => apgar::compute(&input).map(CalculatorResponse::Apgar),
        CalculatorRequest::GlasgowComa(input) => {
            glasgow_coma::compute(&input).map(CalculatorResponse::GlasgowComa)
        }
        CalculatorRequest::CardiacOutput(input) => {
            cardiac_output::compute(&input).map(CalculatorResponse::CardiacOutput)
        }
        CalculatorRequest::AnionGap(input) => {
            anion_gap::compute(&input).map(CalculatorResponse::AnionGap)
        }
        CalculatorRequest::IvDrip(input) => {
            iv_drip::compute(&input).map(CalculatorResponse::IvDrip)
        }
        CalculatorRequest::MeanArterialPressure(input) => {
            mean_arterial_pressure::compute(&input).map(CalculatorResponse::MeanArterialPressure)
        }
        CalculatorRequest::MinuteVentilation(input) => {
            minute_ventilation::compute(&input).map(CalculatorResponse::MinuteVentilation)
        }
        CalculatorRequest::ShockIndex(input) => {
            shock_index::compute(&input).map(CalculatorResponse::ShockIndex)
        }
    }
}

// ═══════════════════════════════════════════
// Shared input checks
// ═══════════════════════════════════════════

/// Round to the given number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Require a finite value strictly greater than zero.
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), CalculatorError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalculatorError::new(field, "must be a positive number"));
    }
    Ok(())
}

/// Require a finite value of zero or more.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), CalculatorError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalculatorError::new(field, "must be zero or more"));
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
