use std::sync::Arc;

use data_source::SchoolsRepository;
use scenario_jobs::{JobStore, PipelineConfig, SmtpConfig};

/// Shared gateway state. `repository` is `None` when the database was
/// unreachable at startup — handlers that need it return 503 rather than
/// panicking, so the gateway can still come up and serve `/api/candidate-sites`
/// and job-status lookups against a database that comes online later.
#[derive(Clone)]
pub struct AppState {
    pub repository: Option<Arc<SchoolsRepository>>,
    pub jobs: JobStore,
    pub pipeline_config: Arc<PipelineConfig>,
    pub smtp: Option<SmtpConfig>,
}
