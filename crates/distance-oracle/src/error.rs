use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("OSRM table request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("OSRM returned status '{0}'")]
    BadStatus(String),

    #[error("OSRM response matrix shape did not match the request")]
    ShapeMismatch,
}

pub type Result<T> = std::result::Result<T, OracleError>;
