//! Static reference tables: process-lifetime constants with linear-scan
//! lookups. Nothing here touches the database.

pub mod interactions;
pub mod learning_paths;
pub mod tanks;

use crate::models::ProviderScope;

// ═══════════════════════════════════════════
// Exam blueprint
// ═══════════════════════════════════════════

/// Questions per certification exam, per NREMT scope.
pub fn blueprint_question_count(scope: ProviderScope) -> usize {
    match scope {
        ProviderScope::Emr => 40,
        ProviderScope::Emt => 60,
        ProviderScope::Aemt => 50,
        ProviderScope::Paramedic => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprint_covers_every_scope() {
        for &scope in ProviderScope::ALL {
            assert!(blueprint_question_count(scope) >= 40);
        }
        assert_eq!(blueprint_question_count(ProviderScope::Emt), 60);
    }
}
