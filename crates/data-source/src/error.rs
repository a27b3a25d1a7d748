use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("no valid school records after cleaning")]
    NoValidRecords,
}

pub type Result<T> = std::result::Result<T, DataError>;
