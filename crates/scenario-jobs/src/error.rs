use thiserror::Error;

/// Errors that abort a scenario run entirely: either rejected at submit
/// time (`UnknownMetric`, not produced by this crate but kept here for
/// gateway-side matching) or fatal failures in a pipeline stage shared by
/// all three models. Per-model solver/render failures are *not* represented
/// here — those are caught inside the worker and recorded without aborting
/// the other models.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("unknown demand metric '{0}'")]
    UnknownMetric(String),
    #[error(transparent)]
    Data(#[from] data_source::DataError),
    #[error(transparent)]
    Oracle(#[from] distance_oracle::OracleError),
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JobError>;
