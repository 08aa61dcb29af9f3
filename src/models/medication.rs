use serde::{Deserialize, Serialize};

/// Reference entry for an EMS medication, organized by provider scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub scope: String,
    pub category: String,
    pub indications: Vec<String>,
    pub contraindications: Vec<String>,
    pub adult_dose: String,
    pub pediatric_dose: Option<String>,
    pub route: String,
    pub onset: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}
