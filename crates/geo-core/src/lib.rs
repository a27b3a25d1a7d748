//! Shared geospatial data model for the facility location service: the
//! record types that flow between the data source, demand builder, distance
//! oracle, optimization core, and map renderer, plus the handful of pure
//! functions (haversine distance, scenario slugging) every one of those
//! crates needs.

mod demand;
mod distance;
mod error;
mod school;
mod slug;

pub use demand::{FacilityCandidate, MIN_FACILITY_CAPACITY};
pub use distance::{haversine_miles, DistanceMatrix, EARTH_RADIUS_MILES};
pub use error::{GeoError, Result};
pub use school::SchoolRecord;
pub use slug::{base_slug, scenario_slug};

pub use demand::DemandPoint;
