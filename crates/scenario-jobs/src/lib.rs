//! Background job orchestration for scenario runs: accepts a scenario
//! specification, dispatches a detached worker that drives the full
//! data-source -> demand-model -> distance-oracle -> facility-solver ->
//! map-renderer pipeline, tracks job state in a concurrent store, and
//! delivers results as artifact paths plus an optional completion email.

mod artifacts;
mod error;
mod model;
mod notify;
mod pipeline;
mod record;
mod request;
mod status;
mod store;

pub use error::{JobError, Result};
pub use model::ModelChoice;
pub use notify::{notify_completion, SmtpConfig};
pub use pipeline::{run_scenario, PipelineConfig, ScenarioParams, DEFAULT_OUTPUT_ROOT};
pub use record::JobRecord;
pub use request::{coerce_coverage_miles, coerce_p, ScenarioRequest, DEFAULT_COVERAGE_MILES, DEFAULT_P};
pub use status::JobStatus;
pub use store::JobStore;
