//! The optimization core: three MIP formulations — capacitated p-median,
//! LSCP, and MCLP — sharing one [`FormulationContext`] built from the
//! demand/facility tables and distance matrix the rest of the pipeline
//! produces. Each solver reports a status and, on `Optimal`, the opened
//! facilities and whatever else its model defines (assignments, coverage).

mod context;
mod error;
mod lscp;
mod mclp;
mod pmedian;
mod status;

pub use context::FormulationContext;
pub use error::{Result, SolverError};
pub use lscp::{solve_lscp, LscpResult};
pub use mclp::{solve_mclp, MclpResult};
pub use pmedian::{solve_pmedian, PmedianResult};
pub use status::SolverStatus;
