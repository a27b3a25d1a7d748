use std::path::{Path, PathBuf};
use std::sync::Arc;

use demand_model::{aggregate_by_block_group, build_demand_and_facilities, DemandMetric};
use distance_oracle::{DistanceBackend, NetworkConfig};
use facility_solver::{solve_lscp, solve_mclp, solve_pmedian, FormulationContext, SolverError};
use geo_core::scenario_slug;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use data_source::SchoolsRepository;

use crate::artifacts::{write_assignments_csv, write_facilities_csv, write_json};
use crate::error::{JobError, Result};
use crate::model::ModelChoice;
use crate::notify::{notify_completion, SmtpConfig};
use crate::record::JobRecord;
use crate::status::JobStatus;
use crate::store::JobStore;

/// Root directory artifacts are written under, matching the original
/// pipeline's own directory name.
pub const DEFAULT_OUTPUT_ROOT: &str = "outputs_location_models_miles";

/// Pipeline-wide settings that don't vary per request: distance backend
/// choice, facility capacity model, output location. Built once at gateway
/// startup and shared across every job.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub seats_per_teacher: f64,
    pub aggregate_block_groups: bool,
    pub k_nearest: usize,
    pub distance_backend: DistanceBackend,
    pub output_root: PathBuf,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let distance_backend = match std::env::var("DISTANCE_BACKEND").ok().as_deref() {
            Some("network") => DistanceBackend::Network(NetworkConfig::default()),
            _ => DistanceBackend::Haversine,
        };
        PipelineConfig {
            seats_per_teacher: std::env::var("SEATS_PER_TEACHER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5.0),
            aggregate_block_groups: std::env::var("AGGREGATE_BLOCK_GROUPS")
                .ok()
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            k_nearest: std::env::var("K_NEAREST").ok().and_then(|v| v.parse().ok()).unwrap_or(0),
            distance_backend,
            output_root: std::env::var("OUTPUT_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        }
    }
}

/// One scenario submission's parameters, already coerced to their typed
/// forms by the HTTP layer.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub scenario_name: String,
    pub demand_metric: DemandMetric,
    pub p: i64,
    pub coverage_miles: f64,
    pub model: ModelChoice,
    pub email: Option<String>,
    pub notify_email: bool,
}

/// Accepts a scenario submission: allocates a job id, computes the scenario
/// slug, records `pending`, spawns the background worker, and returns the
/// job id immediately. The worker is a detached `tokio::spawn` task rather
/// than a pooled job — matching the "one long-lived worker per submission,
/// no bounded pool, no queue" concurrency model.
pub fn run_scenario(
    store: JobStore,
    repository: Arc<SchoolsRepository>,
    config: Arc<PipelineConfig>,
    smtp: Option<SmtpConfig>,
    params: ScenarioParams,
) -> String {
    let job_id = Uuid::new_v4().to_string();
    let slug = scenario_slug(&params.scenario_name);

    let record = JobRecord::pending(
        job_id.clone(),
        params.scenario_name.clone(),
        slug,
        params.demand_metric,
        params.p,
        params.coverage_miles,
        params.model,
        params.email.clone(),
        params.notify_email,
    );
    store.create(record);

    let worker_store = store.clone();
    let worker_job_id = job_id.clone();
    tokio::spawn(async move {
        execute_pipeline(worker_store, worker_job_id, repository, config, smtp, params).await;
    });

    job_id
}

struct PipelineOutcome {
    backend_label: &'static str,
    summary: String,
    artifact_paths: Vec<PathBuf>,
}

async fn execute_pipeline(
    store: JobStore,
    job_id: String,
    repository: Arc<SchoolsRepository>,
    config: Arc<PipelineConfig>,
    smtp: Option<SmtpConfig>,
    params: ScenarioParams,
) {
    store.update(&job_id, |r| r.transition(JobStatus::Running));
    info!(job_id, scenario = %params.scenario_name, "scenario job started");

    match run_pipeline(&repository, &config, &job_id, &store, &params).await {
        Ok(outcome) => {
            store.update(&job_id, |r| {
                r.results_url = Some(format!("/analysis/results/{}", r.scenario_slug));
                r.backend = Some(outcome.backend_label.to_string());
                r.transition(JobStatus::Completed);
            });
            info!(job_id, "scenario job completed");

            if params.notify_email {
                match (smtp.as_ref(), params.email.as_deref()) {
                    (Some(smtp), Some(email)) => notify_completion(
                        smtp,
                        email,
                        &params.scenario_name,
                        &outcome.summary,
                        &outcome.artifact_paths,
                    ),
                    _ => info!(job_id, "notification requested but smtp is not configured, skipping"),
                }
            }
        }
        Err(e) => {
            error!(job_id, error = %e, "scenario job failed");
            store.update(&job_id, |r| {
                r.error = Some(e.to_string());
                r.transition(JobStatus::Failed);
            });
        }
    }
}

/// Runs §4.1–§4.5 in sequence for every model the scenario requested.
/// Per-model coverage/render failures are logged and skip that model's
/// artifacts without aborting the scenario; only a failure in a stage
/// shared by all three models (fetching schools, building the distance
/// matrix) fails the whole job.
async fn run_pipeline(
    repository: &SchoolsRepository,
    config: &PipelineConfig,
    job_id: &str,
    store: &JobStore,
    params: &ScenarioParams,
) -> Result<PipelineOutcome> {
    let schools = repository.fetch_schools().await.map_err(JobError::Data)?;

    let (mut demand, mut facilities) =
        build_demand_and_facilities(&schools, params.demand_metric, config.seats_per_teacher);
    if config.aggregate_block_groups {
        if let Some((agg_demand, agg_facilities)) =
            aggregate_by_block_group(&schools, &demand, config.seats_per_teacher)
        {
            demand = agg_demand;
            facilities = agg_facilities;
        }
    }

    if demand.iter().all(|d| d.demand == 0.0) {
        warn!(job_id, "all demand values are zero after normalization; results will be trivial");
    }

    let mut matrix = config.distance_backend.build(&demand, &facilities).await.map_err(JobError::Oracle)?;
    if config.k_nearest > 0 {
        matrix.prune_k_nearest(config.k_nearest);
    }
    let backend_label = match &config.distance_backend {
        DistanceBackend::Haversine => "haversine",
        DistanceBackend::Network(_) => "network",
    };

    let metric_dir = store.get(job_id).map(|r| r.metric_dir()).unwrap_or_default();
    let out_dir = config.output_root.join(&metric_dir);
    std::fs::create_dir_all(&out_dir)?;

    let ctx = FormulationContext::new(&demand, &facilities, &matrix);
    let mut artifact_paths = Vec::new();
    let mut summary_lines = vec![format!("Scenario: {}", params.scenario_name)];

    if params.model.runs_pmedian() {
        run_pmedian_model(&ctx, &demand, &facilities, params, &out_dir, &mut artifact_paths, &mut summary_lines);
    }
    if params.model.runs_lscp() {
        run_lscp_model(&ctx, &facilities, params, &out_dir, &mut artifact_paths, &mut summary_lines);
    }
    if params.model.runs_mclp() {
        run_mclp_model(&demand, &facilities, &ctx, params, &out_dir, &mut artifact_paths, &mut summary_lines);
    }

    Ok(PipelineOutcome { backend_label, summary: summary_lines.join("\n"), artifact_paths })
}

fn run_pmedian_model(
    ctx: &FormulationContext,
    demand: &[geo_core::DemandPoint],
    facilities: &[geo_core::FacilityCandidate],
    params: &ScenarioParams,
    out_dir: &Path,
    artifact_paths: &mut Vec<PathBuf>,
    summary_lines: &mut Vec<String>,
) {
    match solve_pmedian(ctx, params.p as usize) {
        Ok(result) => {
            if !result.status.is_optimal() {
                warn!(status = %result.status, "p-median did not reach an optimal solution, skipping artifacts");
                summary_lines.push(format!("p-median: {}", result.status));
                return;
            }
            let facilities_path = out_dir.join("pmedian_facilities.csv");
            let assignments_path = out_dir.join("pmedian_assignments.csv");
            let kpis_path = out_dir.join("pmedian_kpis.json");
            let map_path = out_dir.join("map_pmedian.png");

            if write_facilities_csv(&facilities_path, facilities, &result.opened, true).is_ok() {
                artifact_paths.push(facilities_path);
            }
            if write_assignments_csv(&assignments_path, demand, facilities, &result.assignments).is_ok() {
                artifact_paths.push(assignments_path);
            }
            let kpis = json!({
                "status": result.status.to_string(),
                "objective_miles": result.objective_miles,
                "p": params.p,
            });
            if write_json(&kpis_path, &kpis).is_ok() {
                artifact_paths.push(kpis_path);
            }
            if map_renderer::render_pmedian(
                demand,
                facilities,
                &result,
                map_renderer::DEFAULT_SPIDER_SAMPLE,
                map_renderer::DEFAULT_SPIDER_SEED,
                &map_path,
            )
            .is_ok()
            {
                artifact_paths.push(map_path);
            }
            summary_lines.push(format!(
                "p-median: {} facilities opened, objective {:.2} miles",
                result.opened.len(),
                result.objective_miles
            ));
        }
        Err(SolverError::Coverage { model, uncovered_count }) => {
            warn!(model, uncovered_count, "p-median infeasible, skipping artifacts for this model");
            summary_lines.push(format!("p-median: infeasible, {uncovered_count} demand point(s) unreachable"));
        }
    }
}

fn run_lscp_model(
    ctx: &FormulationContext,
    facilities: &[geo_core::FacilityCandidate],
    params: &ScenarioParams,
    out_dir: &Path,
    artifact_paths: &mut Vec<PathBuf>,
    summary_lines: &mut Vec<String>,
) {
    match solve_lscp(ctx, params.coverage_miles) {
        Ok(result) => {
            if !result.status.is_optimal() {
                warn!(status = %result.status, "LSCP did not reach an optimal solution, skipping artifacts");
                summary_lines.push(format!("LSCP: {}", result.status));
                return;
            }
            let facilities_path = out_dir.join("lscp_facilities.csv");
            let kpis_path = out_dir.join("lscp_kpis.json");
            let map_path = out_dir.join("map_lscp.png");

            if write_facilities_csv(&facilities_path, facilities, &result.opened, false).is_ok() {
                artifact_paths.push(facilities_path);
            }
            let kpis = json!({
                "status": result.status.to_string(),
                "coverage_miles": params.coverage_miles,
                "min_facilities": result.min_facilities,
            });
            if write_json(&kpis_path, &kpis).is_ok() {
                artifact_paths.push(kpis_path);
            }
            if map_renderer::render_lscp(ctx.demand, facilities, &result, params.coverage_miles, &map_path).is_ok() {
                artifact_paths.push(map_path);
            }
            summary_lines.push(format!("LSCP: {} facilities required", result.min_facilities));
        }
        Err(SolverError::Coverage { model, uncovered_count }) => {
            warn!(model, uncovered_count, "LSCP infeasible at this radius, skipping artifacts for this model");
            summary_lines.push(format!(
                "LSCP: infeasible at {} mi, {uncovered_count} demand point(s) uncovered",
                params.coverage_miles
            ));
        }
    }
}

fn run_mclp_model(
    demand: &[geo_core::DemandPoint],
    facilities: &[geo_core::FacilityCandidate],
    ctx: &FormulationContext,
    params: &ScenarioParams,
    out_dir: &Path,
    artifact_paths: &mut Vec<PathBuf>,
    summary_lines: &mut Vec<String>,
) {
    match solve_mclp(ctx, params.p as usize, params.coverage_miles) {
        Ok(result) => {
            if !result.status.is_optimal() {
                warn!(status = %result.status, "MCLP did not reach an optimal solution, skipping artifacts");
                summary_lines.push(format!("MCLP: {}", result.status));
                return;
            }
            let facilities_path = out_dir.join("mclp_facilities.csv");
            let kpis_path = out_dir.join("mclp_kpis.json");
            let map_path = out_dir.join("map_mclp.png");

            if write_facilities_csv(&facilities_path, facilities, &result.opened, false).is_ok() {
                artifact_paths.push(facilities_path);
            }
            let kpis = json!({
                "status": result.status.to_string(),
                "coverage_miles": params.coverage_miles,
                "p": params.p,
                "covered": result.covered_demand,
                "total": result.total_demand,
                "pct": result.pct_covered,
            });
            if write_json(&kpis_path, &kpis).is_ok() {
                artifact_paths.push(kpis_path);
            }
            if map_renderer::render_mclp(demand, facilities, &result, params.coverage_miles, &map_path).is_ok() {
                artifact_paths.push(map_path);
            }
            summary_lines.push(format!("MCLP: {:.1}% of demand covered", result.pct_covered));
        }
        Err(SolverError::Coverage { model, uncovered_count }) => {
            warn!(model, uncovered_count, "MCLP precheck failed unexpectedly, skipping artifacts for this model");
            summary_lines.push("MCLP: precheck failed".to_string());
        }
    }
}
