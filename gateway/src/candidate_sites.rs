use axum::Json;
use serde_json::{json, Value};

/// `GET /api/candidate-sites`. The original backend returns hardcoded
/// counts here too ("In a real app, this would query the database") — the
/// request body's own `candidateSites` field is documented as purely
/// informational, so there is nothing behind this endpoint to make dynamic
/// yet.
pub async fn candidate_sites() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sites": {
            "elementary": 124,
            "middle": 59,
            "high": 41,
            "libraries": 37,
        }
    }))
}
