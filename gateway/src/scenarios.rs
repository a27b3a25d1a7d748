use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use demand_model::DemandMetric;
use scenario_jobs::{coerce_coverage_miles, coerce_p, ModelChoice, ScenarioParams, ScenarioRequest};
use serde_json::{json, Value};

use crate::state::AppState;

/// `POST /api/scenarios/run`. Rejects only an unrecognized demand metric or
/// a missing repository; every other field is coerced rather than
/// rejected (see `scenario_jobs::request`'s doc comments).
pub async fn run_scenario(
    State(state): State<AppState>,
    Json(body): Json<ScenarioRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(repository) = state.repository.clone() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "message": "database is unavailable" })),
        );
    };

    let demand_metric = match DemandMetric::from_str(&body.demand_metric) {
        Ok(metric) => metric,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": format!("Invalid demand metric: {e}") })),
            );
        }
    };

    let p = coerce_p(&body.p);
    let coverage_miles = coerce_coverage_miles(&body.coverage_miles);
    let model = body
        .model
        .as_deref()
        .map(|s| ModelChoice::from_str(s).unwrap_or_default())
        .unwrap_or_default();

    let params = ScenarioParams {
        scenario_name: body.scenario_name,
        demand_metric,
        p,
        coverage_miles,
        model,
        email: body.email,
        notify_email: body.notify_email,
    };

    let job_id = scenario_jobs::run_scenario(state.jobs, repository, state.pipeline_config, state.smtp, params);

    (
        StatusCode::ACCEPTED,
        Json(json!({ "status": "ok", "job_id": job_id, "message": "scenario submitted" })),
    )
}
