//! Serum anion gap with optional albumin correction, for metabolic
//! acidosis screening.

use serde::{Deserialize, Serialize};

use super::{check_positive, round_to, CalculatorError};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

/// Normal serum albumin (g/dL) used by the correction term.
const NORMAL_ALBUMIN_G_DL: f64 = 4.0;

/// Gap change per g/dL of albumin below normal.
const GAP_PER_ALBUMIN_G_DL: f64 = 2.5;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct AnionGapInput {
    /// Serum sodium (mEq/L).
    pub sodium: f64,
    /// Serum chloride (mEq/L).
    pub chloride: f64,
    /// Serum bicarbonate (mEq/L).
    pub bicarbonate: f64,
    /// Serum albumin (g/dL); corrects the gap for hypoalbuminemia.
    pub albumin: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnionGapResult {
    pub anion_gap: f64,
    /// Equals `anion_gap` when no albumin was supplied.
    pub corrected_gap: f64,
    pub category: String,
    pub interpretation: String,
    pub possible_causes: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

// ═══════════════════════════════════════════
// Computation
// ═══════════════════════════════════════════

/// AG = Na − (Cl + HCO₃); corrected = AG + 2.5 × (4.0 − albumin).
pub fn compute(input: &AnionGapInput) -> Result<AnionGapResult, CalculatorError> {
    check_positive("sodium", input.sodium)?;
    check_positive("chloride", input.chloride)?;
    check_positive("bicarbonate", input.bicarbonate)?;
    if let Some(albumin) = input.albumin {
        check_positive("albumin", albumin)?;
    }

    let anion_gap = input.sodium - (input.chloride + input.bicarbonate);
    let corrected_gap = match input.albumin {
        Some(albumin) => anion_gap + GAP_PER_ALBUMIN_G_DL * (NORMAL_ALBUMIN_G_DL - albumin),
        None => anion_gap,
    };

    let (category, interpretation, possible_causes, recommendations) = if corrected_gap < 8.0 {
        (
            "Low",
            "Low anion gap - Unusual finding",
            vec![
                "Hypoalbuminemia",
                "Multiple myeloma",
                "Lithium toxicity",
                "Magnesium toxicity",
                "Laboratory error",
            ],
            vec![
                "Verify laboratory values",
                "Check protein levels",
                "Assess medication history",
                "Consider repeat testing",
            ],
        )
    } else if corrected_gap <= 12.0 {
        (
            "Normal",
            "Normal anion gap",
            vec![
                "Normal acid-base balance",
                "Non-anion gap metabolic acidosis (if acidotic)",
            ],
            vec![
                "Continue routine monitoring",
                "Assess overall acid-base status",
                "Monitor for changes",
            ],
        )
    } else {
        (
            "Elevated",
            "High anion gap - Metabolic acidosis likely",
            vec![
                "Diabetic ketoacidosis (DKA)",
                "Lactic acidosis",
                "Renal failure",
                "Salicylate poisoning",
                "Methanol/ethylene glycol poisoning",
                "Starvation ketosis",
            ],
            vec![
                "Assess for diabetic ketoacidosis",
                "Check blood glucose and ketones",
                "Evaluate for shock/hypoperfusion",
                "Consider toxic ingestion",
                "Monitor renal function",
                "Urgent medical evaluation needed",
            ],
        )
    };

    Ok(AnionGapResult {
        anion_gap: round_to(anion_gap, 1),
        corrected_gap: round_to(corrected_gap, 1),
        category: category.to_string(),
        interpretation: interpretation.to_string(),
        possible_causes,
        recommendations,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn input(sodium: f64, chloride: f64, bicarbonate: f64, albumin: Option<f64>) -> AnionGapInput {
        AnionGapInput {
            sodium,
            chloride,
            bicarbonate,
            albumin,
        }
    }

    #[test]
    fn typical_chemistry_is_normal() {
        let result = compute(&input(140.0, 104.0, 24.0, None)).unwrap();
        assert_eq!(result.anion_gap, 12.0);
        assert_eq!(result.corrected_gap, 12.0);
        assert_eq!(result.category, "Normal");
    }

    #[test]
    fn dka_chemistry_is_elevated() {
        let result = compute(&input(138.0, 100.0, 12.0, None)).unwrap();
        assert_eq!(result.anion_gap, 26.0);
        assert_eq!(result.category, "Elevated");
        assert!(result.possible_causes.contains(&"Diabetic ketoacidosis (DKA)"));
    }

    #[test]
    fn low_gap_flagged() {
        let result = compute(&input(135.0, 105.0, 25.0, None)).unwrap();
        assert_eq!(result.anion_gap, 5.0);
        assert_eq!(result.category, "Low");
    }

    #[test]
    fn albumin_correction_raises_gap() {
        // Hypoalbuminemia masks an elevated gap: 10 + 2.5 × (4.0 − 2.0) = 15.
        let result = compute(&input(140.0, 106.0, 24.0, Some(2.0))).unwrap();
        assert_eq!(result.anion_gap, 10.0);
        assert_eq!(result.corrected_gap, 15.0);
        assert_eq!(result.category, "Elevated");
    }

    #[test]
    fn normal_albumin_leaves_gap_unchanged() {
        let result = compute(&input(140.0, 104.0, 24.0, Some(4.0))).unwrap();
        assert_eq!(result.anion_gap, result.corrected_gap);
    }

    #[test]
    fn rejects_missing_chemistry() {
        let err = compute(&input(0.0, 104.0, 24.0, None)).unwrap_err();
        assert_eq!(err.field, "sodium");
    }
}
