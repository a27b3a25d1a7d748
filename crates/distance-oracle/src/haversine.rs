use geo_core::{haversine_miles, DemandPoint, DistanceMatrix, FacilityCandidate};

/// Dense great-circle back-end: every demand point is paired with every
/// facility candidate.
pub struct HaversineBackend;

impl HaversineBackend {
    pub fn build(demand: &[DemandPoint], facilities: &[FacilityCandidate]) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new(demand.len());
        for (i, d) in demand.iter().enumerate() {
            for (j, f) in facilities.iter().enumerate() {
                let miles = haversine_miles(d.latitude, d.longitude, f.latitude, f.longitude);
                matrix.insert(i, j, miles);
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_complete_bipartite_matrix() {
        let demand = vec![DemandPoint::new("d0", 33.7, -84.4, 0.5), DemandPoint::new("d1", 34.0, -84.0, 0.2)];
        let facilities = vec![FacilityCandidate::new("f0", 33.8, -84.3, 100.0)];
        let matrix = HaversineBackend::build(&demand, &facilities);
        assert_eq!(matrix.distances.len(), 2);
        assert!(matrix.get(0, 0).is_some());
        assert!(matrix.get(1, 0).is_some());
    }
}
