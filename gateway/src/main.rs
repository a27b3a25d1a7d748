use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use data_source::{DbConfig, SchoolsRepository};
use scenario_jobs::{JobStore, PipelineConfig, SmtpConfig};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod candidate_sites;
mod jobs;
mod results;
mod scenarios;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "facility_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pipeline_config = Arc::new(PipelineConfig::from_env());
    std::fs::create_dir_all(&pipeline_config.output_root)?;

    let db_config = DbConfig::from_env();
    let repository = match SchoolsRepository::connect(&db_config).await {
        Ok(repo) => {
            tracing::info!("connected to schools database");
            Some(Arc::new(repo))
        }
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable at startup; will serve without it");
            None
        }
    };

    let smtp = SmtpConfig::from_env();
    tracing::info!("smtp notification: {}", if smtp.is_some() { "configured" } else { "disabled" });

    let state = AppState { repository, jobs: JobStore::new(), pipeline_config, smtp };

    let app = Router::new()
        .route("/api/candidate-sites", get(candidate_sites::candidate_sites))
        .route("/api/scenarios/run", post(scenarios::run_scenario))
        .route("/api/jobs/{job_id}", get(jobs::get_job))
        .route("/analysis/results/{slug}", get(results::list_results))
        .route("/analysis/files/{slug}/{*relpath}", get(results::get_file))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("GATEWAY_PORT").or_else(|_| std::env::var("PORT")).unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
