//! Produces the sparse demand-to-facility distance matrix the optimization
//! core solves over, via either of two interchangeable back-ends: a dense
//! haversine great-circle matrix, or a sparse road-network matrix served by
//! an OSRM Table API. Both back-ends report miles and share the same
//! [`DistanceMatrix`] shape; the choice between them is a runtime
//! configuration, not a code fork downstream.

mod bbox;
mod error;
mod haversine;
mod network;

pub use bbox::{BoundingBox, MIN_RADIUS_MILES};
pub use error::{OracleError, Result};
pub use haversine::HaversineBackend;
pub use network::{NetworkBackend, NetworkConfig};

use geo_core::{DemandPoint, DistanceMatrix, FacilityCandidate};

/// Selects which back-end a scenario run should use to build its distance
/// matrix. Kept as a plain enum rather than a trait object: only two
/// back-ends ever exist and the network one is fallible and async while
/// haversine is neither, so a shared trait would just paper over that
/// difference.
#[derive(Debug, Clone)]
pub enum DistanceBackend {
    Haversine,
    Network(NetworkConfig),
}

impl DistanceBackend {
    pub async fn build(
        &self,
        demand: &[DemandPoint],
        facilities: &[FacilityCandidate],
    ) -> Result<DistanceMatrix> {
        match self {
            DistanceBackend::Haversine => Ok(HaversineBackend::build(demand, facilities)),
            DistanceBackend::Network(config) => {
                NetworkBackend::new(config.clone()).build(demand, facilities).await
            }
        }
    }
}
