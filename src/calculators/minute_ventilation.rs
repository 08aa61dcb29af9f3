//! Minute ventilation from tidal volume and respiratory rate.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Weight-based thresholds, L/min/kg.
const PER_KG_LOW: f64 = 0.06;
const PER_KG_HIGH: f64 = 0.15;

/// Absolute thresholds when no weight is supplied, L/min.
const ABSOLUTE_LOW: f64 = 4.0;
const ABSOLUTE_HIGH: f64 = 10.0;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct MinuteVentilationInput {
    pub tidal_volume_ml: f64,
    pub respiratory_rate: f64,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinuteVentilationResult {
    /// L/min.
    pub minute_ventilation: f64,
    /// L/min/kg, present only when a weight was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_kg: Option<f64>,
    pub category: String,
    pub interpretation: String,
    pub recommendations: Vec<&'static str>,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// MV = tidal volume × respiratory rate. Categorized per kg when a
/// weight is supplied, otherwise against absolute adult thresholds.
pub fn compute(input: &MinuteVentilationInput) -> Result<MinuteVentilationResult, CalculatorError> {
    check_positive("tidal_volume_ml", input.tidal_volume_ml)?;
    check_positive("respiratory_rate", input.respiratory_rate)?;
    if let Some(weight) = input.weight_kg {
        check_positive("weight_kg", weight)?;
    }

    let minute_ventilation = input.tidal_volume_ml * input.respiratory_rate / 1000.0;

    let (per_kg, category) = match input.weight_kg {
        Some(weight) => {
            let per_kg = minute_ventilation / weight;
            let category = if per_kg < PER_KG_LOW {
                "Low"
            } else if per_kg <= PER_KG_HIGH {
                "Normal"
            } else {
                "High"
            };
            (Some(round_to(per_kg, 3)), category)
        }
        None => {
            let category = if minute_ventilation < ABSOLUTE_LOW {
                "Low"
            } else if minute_ventilation <= ABSOLUTE_HIGH {
                "Normal"
            } else {
                "High"
            };
            (None, category)
        }
    };

    let interpretation = match category {
        "Low" => "Low minute ventilation - Hypoventilation",
        "Normal" => "Normal minute ventilation",
        _ => "High minute ventilation - Hyperventilation",
    };

    let recommendations = if input.weight_kg.is_some() {
        match category {
            "Low" => vec![
                "Assess for respiratory depression",
                "Consider assisted ventilation",
                "Check airway patency",
                "Monitor oxygen saturation",
                "Evaluate for narcotic overdose",
            ],
            "Normal" => vec![
                "Continue current monitoring",
                "Maintain spontaneous breathing",
                "Regular assessment of work of breathing",
                "Monitor for changes",
            ],
            _ => vec![
                "Assess for anxiety/pain",
                "Consider metabolic acidosis",
                "Evaluate for hypoxemia",
                "Monitor for respiratory fatigue",
                "Consider sedation if appropriate",
            ],
        }
    } else {
        vec![
            "Consider patient weight for more accurate assessment",
            "Evaluate clinical context",
            "Monitor respiratory effort",
            "Assess for underlying causes",
        ]
    };

    Ok(MinuteVentilationResult {
        minute_ventilation: round_to(minute_ventilation, 2),
        per_kg,
        category: category.to_string(),
        interpretation: interpretation.to_string(),
        recommendations,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
