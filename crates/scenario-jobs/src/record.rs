use chrono::{DateTime, Utc};
use demand_model::DemandMetric;
use serde::Serialize;

use crate::model::ModelChoice;
use crate::status::JobStatus;

/// A scenario run's full record. Only a subset of these fields are ever
/// serialized back over HTTP (see the `#[serde(skip)]`s below) — the rest
/// exist so the worker has everything it needs without re-threading
/// arguments through `JobStore`.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job_id: String,
    #[serde(skip)]
    pub scenario_name: String,
    pub scenario_slug: String,
    #[serde(skip)]
    pub demand_metric: DemandMetric,
    #[serde(skip)]
    pub p: i64,
    #[serde(skip)]
    pub coverage_miles: f64,
    #[serde(skip)]
    pub model: ModelChoice,
    #[serde(skip)]
    pub email: Option<String>,
    #[serde(skip)]
    pub notify_email: bool,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn pending(
        job_id: String,
        scenario_name: String,
        scenario_slug: String,
        demand_metric: DemandMetric,
        p: i64,
        coverage_miles: f64,
        model: ModelChoice,
        email: Option<String>,
        notify_email: bool,
    ) -> Self {
        JobRecord {
            job_id,
            scenario_name,
            scenario_slug,
            demand_metric,
            p,
            coverage_miles,
            model,
            email,
            notify_email,
            created_at: Utc::now(),
            status: JobStatus::Pending,
            results_url: None,
            backend: None,
            error: None,
        }
    }

    /// `<scenario_slug>/<metric_slug>`, the directory a completed job's
    /// artifacts live under, relative to the output root.
    pub fn metric_dir(&self) -> String {
        format!("{}/{}", self.scenario_slug, self.demand_metric)
    }

    /// Moves the job to `next`, panicking on any transition that isn't
    /// `Pending -> Running` or `Running -> {Completed, Failed}`. This is an
    /// in-process invariant violation (a bug in the worker, never a runtime
    /// condition a caller can hit legitimately), so it panics rather than
    /// returning a `Result` — matching spec.md's "terminal states never
    /// change" and "from pending only running is reachable".
    pub fn transition(&mut self, next: JobStatus) {
        let legal = matches!(
            (self.status, next),
            (JobStatus::Pending, JobStatus::Running)
                | (JobStatus::Running, JobStatus::Completed)
                | (JobStatus::Running, JobStatus::Failed)
        );
        if !legal {
            panic!("illegal job status transition: {:?} -> {:?}", self.status, next);
        }
        self.status = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> JobRecord {
        JobRecord::pending(
            "job1".to_string(),
            "Test".to_string(),
            "test_abcdef".to_string(),
            DemandMetric::Sfr,
            5,
            5.0,
            ModelChoice::All,
            None,
            false,
        )
    }

    #[test]
    fn pending_to_running_to_completed_is_legal() {
        let mut r = record();
        r.transition(JobStatus::Running);
        assert_eq!(r.status, JobStatus::Running);
        r.transition(JobStatus::Completed);
        assert_eq!(r.status, JobStatus::Completed);
    }

    #[test]
    fn running_to_failed_is_legal() {
        let mut r = record();
        r.transition(JobStatus::Running);
        r.transition(JobStatus::Failed);
        assert_eq!(r.status, JobStatus::Failed);
    }

    #[test]
    #[should_panic(expected = "illegal job status transition")]
    fn pending_to_completed_is_illegal() {
        let mut r = record();
        r.transition(JobStatus::Completed);
    }

    #[test]
    #[should_panic(expected = "illegal job status transition")]
    fn terminal_state_never_changes() {
        let mut r = record();
        r.transition(JobStatus::Running);
        r.transition(JobStatus::Completed);
        r.transition(JobStatus::Running);
    }
}
