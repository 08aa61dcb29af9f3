//! Static reference endpoints: drug interactions and oxygen tanks.
//!
//! - `GET /api/interactions` — the full interaction table
//! - `POST /api/interactions/check` — pairwise check of a medication list
//! - `GET /api/reference/tanks` — oxygen cylinder specifications

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::reference::interactions::{check_interactions, DrugInteraction, INTERACTIONS};
use crate::reference::tanks::{OxygenTank, TANKS};

/// `GET /api/interactions` — the bundled interaction table.
pub async fn interactions() -> Json<&'static [DrugInteraction]> {
    Json(INTERACTIONS)
}

#[derive(Debug, Deserialize)]
pub struct InteractionCheckRequest {
    #[serde(default)]
    pub medications: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InteractionCheckResponse {
    pub interactions: Vec<&'static DrugInteraction>,
    pub count: usize,
}

/// `POST /api/interactions/check` — check every pair in a medication
/// list against the interaction table. Name matching falls back to a
/// case-insensitive substring comparison, so results are advisory.
pub async fn check(Json(request): Json<InteractionCheckRequest>) -> Json<InteractionCheckResponse> {
    let found = check_interactions(&request.medications);
    let count = found.len();
    Json(InteractionCheckResponse {
        interactions: found,
        count,
    })
}

/// `GET /api/reference/tanks` — oxygen cylinder specifications.
pub async fn tanks() -> Json<&'static [OxygenTank]> {
    Json(TANKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn check_finds_known_pair() {
        let request = InteractionCheckRequest {
            medications: vec!["Aspirin".into(), "Warfarin".into()],
        };
        let Json(response) = check(Json(request)).await;

        assert_eq!(response.count, 1);
        assert_eq!(response.interactions[0].severity.as_str(), "major");
    }

    #[tokio::test]
    async fn check_with_no_pairs_is_empty() {
        let request = InteractionCheckRequest {
            medications: vec!["Oxygen".into()],
        };
        let Json(response) = check(Json(request)).await;

        assert_eq!(response.count, 0);
    }
}
