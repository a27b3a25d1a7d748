use std::sync::Arc;

use dashmap::DashMap;

use crate::record::JobRecord;

/// Process-wide job map, keyed by job id. A single [`DashMap`] stands in for
/// the teacher's `Arc<RwLock<..>>` shared-state pattern: a job store under
/// concurrent insert/lookup from many request-handling tasks and one
/// worker-per-job is exactly the case `dashmap` exists for.
///
/// Ownership discipline: a job's worker is the only writer to its own
/// record after `create`. `update` takes a closure rather than exposing a
/// mutable reference across an await point, so a caller can't accidentally
/// hold the shard lock open.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<DashMap<String, JobRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        JobStore { jobs: Arc::new(DashMap::new()) }
    }

    pub fn create(&self, record: JobRecord) {
        self.jobs.insert(record.job_id.clone(), record);
    }

    pub fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.jobs.get(job_id).map(|entry| entry.clone())
    }

    pub fn update(&self, job_id: &str, mutate: impl FnOnce(&mut JobRecord)) {
        if let Some(mut entry) = self.jobs.get_mut(job_id) {
            mutate(&mut entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelChoice;
    use crate::status::JobStatus;
    use demand_model::DemandMetric;

    #[test]
    fn create_then_get_round_trips() {
        let store = JobStore::new();
        let record = JobRecord::pending(
            "job1".to_string(),
            "Test".to_string(),
            "test_abcdef".to_string(),
            DemandMetric::Sfr,
            5,
            5.0,
            ModelChoice::All,
            None,
            false,
        );
        store.create(record);
        assert_eq!(store.get("job1").unwrap().status, JobStatus::Pending);
        assert!(store.get("unknown").is_none());
    }

    #[test]
    fn update_mutates_only_the_named_job() {
        let store = JobStore::new();
        store.create(JobRecord::pending(
            "job1".to_string(),
            "Test".to_string(),
            "test_abcdef".to_string(),
            DemandMetric::Sfr,
            5,
            5.0,
            ModelChoice::All,
            None,
            false,
        ));
        store.update("job1", |r| r.status = JobStatus::Running);
        assert_eq!(store.get("job1").unwrap().status, JobStatus::Running);
    }
}
