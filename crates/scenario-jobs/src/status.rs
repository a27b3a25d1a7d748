use serde::Serialize;

/// A job's lifecycle state. `pending -> running -> {completed, failed}`;
/// terminal states never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}
