//! Drug-interaction table and pairwise matcher.
//!
//! The matcher is two-level: exact name equality in either order first,
//! then a case-insensitive substring fallback. The fallback is a known
//! false-positive source ("Epinephrine" matches inside "Norepinephrine")
//! and is kept deliberately; callers surface severity, not certainty.

use serde::Serialize;

use crate::models::InteractionSeverity;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct DrugInteraction {
    pub drug_1: &'static str,
    pub drug_2: &'static str,
    pub severity: InteractionSeverity,
    pub description: &'static str,
    pub clinical_effects: &'static str,
    pub management: &'static str,
}

// ═══════════════════════════════════════════
// Table
// ═══════════════════════════════════════════

pub const INTERACTIONS: &[DrugInteraction] = &[
    DrugInteraction {
        drug_1: "Aspirin",
        drug_2: "Warfarin",
        severity: InteractionSeverity::Major,
        description: "Increased risk of bleeding",
        clinical_effects: "May increase anticoagulant effects leading to bleeding complications",
        management: "Monitor INR closely, consider alternative antiplatelet therapy",
    },
    DrugInteraction {
        drug_1: "Morphine",
        drug_2: "Lorazepam",
        severity: InteractionSeverity::Major,
        description: "Enhanced CNS depression",
        clinical_effects: "Increased sedation, respiratory depression",
        management: "Use with extreme caution, monitor respiratory status",
    },
    DrugInteraction {
        drug_1: "Epinephrine",
        drug_2: "Propranolol",
        severity: InteractionSeverity::Moderate,
        description: "Reduced effectiveness of epinephrine",
        clinical_effects: "Beta-blocker may reduce epinephrine effectiveness",
        management: "Consider higher doses of epinephrine if needed",
    },
    DrugInteraction {
        drug_1: "Fentanyl",
        drug_2: "Midazolam",
        severity: InteractionSeverity::Major,
        description: "Synergistic CNS and respiratory depression",
        clinical_effects: "Severe sedation, respiratory depression, potential coma",
        management: "Reduce doses, continuous monitoring, have naloxone/flumazenil ready",
    },
    DrugInteraction {
        drug_1: "Naloxone",
        drug_2: "Morphine",
        severity: InteractionSeverity::Major,
        description: "Opioid antagonist reversal",
        clinical_effects: "Naloxone will reverse morphine effects, potential withdrawal",
        management: "Monitor for return of pain, respiratory depression after naloxone wears off",
    },
    DrugInteraction {
        drug_1: "Adenosine",
        drug_2: "Theophylline",
        severity: InteractionSeverity::Moderate,
        description: "Reduced adenosine effectiveness",
        clinical_effects: "Methylxanthines block adenosine receptors",
        management: "May require higher adenosine doses",
    },
    DrugInteraction {
        drug_1: "Succinylcholine",
        drug_2: "Atracurium",
        severity: InteractionSeverity::Major,
        description: "Prolonged neuromuscular blockade",
        clinical_effects: "Extended paralysis, respiratory compromise",
        management: "Avoid combination, ensure adequate ventilation",
    },
    DrugInteraction {
        drug_1: "Dopamine",
        drug_2: "Norepinephrine",
        severity: InteractionSeverity::Moderate,
        description: "Additive vasopressor effects",
        clinical_effects: "Severe hypertension, arrhythmias",
        management: "Monitor blood pressure closely, reduce doses if needed",
    },
    DrugInteraction {
        drug_1: "Amiodarone",
        drug_2: "Digoxin",
        severity: InteractionSeverity::Major,
        description: "Increased digoxin levels",
        clinical_effects: "Digoxin toxicity, arrhythmias",
        management: "Monitor digoxin levels, reduce digoxin dose",
    },
    DrugInteraction {
        drug_1: "Lidocaine",
        drug_2: "Propranolol",
        severity: InteractionSeverity::Moderate,
        description: "Increased lidocaine toxicity",
        clinical_effects: "Enhanced CNS and cardiac effects",
        management: "Monitor for lidocaine toxicity signs",
    },
];

// ═══════════════════════════════════════════
// Matching
// ═══════════════════════════════════════════

/// Find the table row for one medication pair, exact order-insensitive
/// equality first, then the substring fallback.
pub fn find_interaction(a: &str, b: &str) -> Option<&'static DrugInteraction> {
    let exact = INTERACTIONS.iter().find(|row| {
        (row.drug_1 == a && row.drug_2 == b) || (row.drug_1 == b && row.drug_2 == a)
    });
    if exact.is_some() {
        return exact;
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();
    INTERACTIONS.iter().find(|row| {
        let d1 = row.drug_1.to_lowercase();
        let d2 = row.drug_2.to_lowercase();
        (a.contains(&d1) && b.contains(&d2))
            || (a.contains(&d2) && b.contains(&d1))
            || (d1.contains(&a) && d2.contains(&b))
            || (d2.contains(&a) && d1.contains(&b))
    })
}

/// Check every unordered pair in a medication list.
pub fn check_interactions(medications: &[String]) -> Vec<&'static DrugInteraction> {
    let mut found = Vec::new();
    for (i, a) in medications.iter().enumerate() {
        for b in &medications[i + 1..] {
            if let Some(interaction) = find_interaction(a, b) {
                found.push(interaction);
            }
        }
    }
    found
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_in_either_order() {
        let forward = find_interaction("Aspirin", "Warfarin").unwrap();
        let reversed = find_interaction("Warfarin", "Aspirin").unwrap();
        assert_eq!(forward.description, "Increased risk of bleeding");
        assert_eq!(forward.description, reversed.description);
    }

    #[test]
    fn lowercase_names_hit_the_fallback() {
        let hit = find_interaction("aspirin", "warfarin").unwrap();
        assert_eq!(hit.severity, InteractionSeverity::Major);
    }

    #[test]
    fn substring_fallback_false_positive_is_preserved() {
        // Norepinephrine contains "epinephrine", so the beta-blocker row
        // fires even though the table names epinephrine itself.
        let hit = find_interaction("Norepinephrine", "Propranolol").unwrap();
        assert_eq!(hit.drug_1, "Epinephrine");
    }

    #[test]
    fn unrelated_pair_has_no_interaction() {
        assert!(find_interaction("Albuterol", "Glucose").is_none());
    }

    #[test]
    fn checks_every_pair_in_the_list() {
        let meds = vec![
            "Aspirin".to_string(),
            "Warfarin".to_string(),
            "Morphine".to_string(),
            "Lorazepam".to_string(),
        ];
        let found = check_interactions(&meds);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn check_is_symmetric() {
        let ab = check_interactions(&["Amiodarone".to_string(), "Digoxin".to_string()]);
        let ba = check_interactions(&["Digoxin".to_string(), "Amiodarone".to_string()]);
        let names = |rows: &[&DrugInteraction]| -> Vec<&str> {
            rows.iter().map(|row| row.description).collect()
        };
        assert_eq!(names(&ab), names(&ba));
        assert_eq!(ab.len(), 1);
    }

    #[test]
    fn table_has_ten_rows_no_self_pairs() {
        assert_eq!(INTERACTIONS.len(), 10);
        assert!(INTERACTIONS.iter().all(|row| row.drug_1 != row.drug_2));
    }
}
