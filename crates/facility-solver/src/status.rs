use std::fmt;

/// Solver outcome. Only `Optimal` carries a usable solution; every other
/// status is reported but yields no artifacts downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverStatus {
    Optimal,
    /// Carries the underlying solver's own status/error text (infeasible,
    /// unbounded, time limit, ...) verbatim, since `good_lp`'s backends do
    /// not expose a closed enum of MIP statuses.
    Other(String),
}

impl SolverStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Optimal => write!(f, "Optimal"),
            SolverStatus::Other(msg) => write!(f, "{msg}"),
        }
    }
}
