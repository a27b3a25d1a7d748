use thiserror::Error;

/// Errors raised before a model is ever handed to the solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("{model}: {uncovered_count} demand point(s) have no reachable facility")]
    Coverage { model: &'static str, uncovered_count: usize },
}

pub type Result<T> = std::result::Result<T, SolverError>;
