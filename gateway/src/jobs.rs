use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// `GET /api/jobs/<job_id>`. `JobRecord`'s own `Serialize` impl already
/// skips the internal-only fields and conditionally includes
/// `results_url`/`backend`/`error`, so this handler is a plain lookup.
pub async fn get_job(State(state): State<AppState>, Path(job_id): Path<String>) -> (StatusCode, Json<Value>) {
    match state.jobs.get(&job_id) {
        Some(record) => (StatusCode::OK, Json(serde_json::to_value(record).unwrap_or(Value::Null))),
        None => (StatusCode::NOT_FOUND, Json(json!({ "status": "error", "message": "unknown job id" }))),
    }
}
