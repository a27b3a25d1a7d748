use serde::{Deserialize, Serialize};

/// A demand location with a normalized weight in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub demand: f64,
}

impl DemandPoint {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, demand: f64) -> Self {
        DemandPoint {
            id: id.into(),
            latitude,
            longitude,
            demand: demand.clamp(0.0, 1.0),
        }
    }
}

/// Minimum facility capacity, regardless of how few certified teachers a
/// school reports (mirrors the original's `max(50, teachers * seats)` floor).
pub const MIN_FACILITY_CAPACITY: f64 = 50.0;

/// A candidate facility with a capacity derived from certified teacher counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityCandidate {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: f64,
}

impl FacilityCandidate {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, capacity: f64) -> Self {
        FacilityCandidate {
            id: id.into(),
            latitude,
            longitude,
            capacity: capacity.max(MIN_FACILITY_CAPACITY),
        }
    }

    pub fn from_teacher_count(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        certified_teachers: f64,
        seats_per_teacher: f64,
    ) -> Self {
        let capacity = (certified_teachers * seats_per_teacher).max(MIN_FACILITY_CAPACITY);
        FacilityCandidate {
            id: id.into(),
            latitude,
            longitude,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demand_is_clamped() {
        assert_eq!(DemandPoint::new("d1", 0.0, 0.0, 1.5).demand, 1.0);
        assert_eq!(DemandPoint::new("d2", 0.0, 0.0, -0.2).demand, 0.0);
    }

    #[test]
    fn capacity_floor_applies() {
        let fac = FacilityCandidate::from_teacher_count("f1", 0.0, 0.0, 2.0, 5.0);
        assert_eq!(fac.capacity, 50.0);
        let fac2 = FacilityCandidate::from_teacher_count("f2", 0.0, 0.0, 30.0, 5.0);
        assert_eq!(fac2.capacity, 150.0);
    }
}
