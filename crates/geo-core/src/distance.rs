use std::collections::HashMap;

/// Mean Earth radius in miles, matching spec.md's distance unit.
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Great-circle distance between two lat/lon points, in miles.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_MILES * c
}

/// A sparse demand-to-facility distance matrix, in miles, with a per-demand
/// neighbor index for quick lookups during model construction.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    pub distances: HashMap<(usize, usize), f64>,
    pub neighbors: Vec<Vec<usize>>,
}

impl DistanceMatrix {
    pub fn new(demand_count: usize) -> Self {
        DistanceMatrix {
            distances: HashMap::new(),
            neighbors: vec![Vec::new(); demand_count],
        }
    }

    pub fn insert(&mut self, demand_idx: usize, facility_idx: usize, miles: f64) {
        self.distances.insert((demand_idx, facility_idx), miles);
        self.neighbors[demand_idx].push(facility_idx);
    }

    pub fn get(&self, demand_idx: usize, facility_idx: usize) -> Option<f64> {
        self.distances.get(&(demand_idx, facility_idx)).copied()
    }

    /// Keeps only the `k` nearest facilities for each demand point. `k == 0`
    /// is a no-op (mirrors the original's `knearest <= 0` meaning "no pruning").
    pub fn prune_k_nearest(&mut self, k: usize) {
        if k == 0 {
            return;
        }
        for (demand_idx, neighbor_list) in self.neighbors.iter_mut().enumerate() {
            if neighbor_list.len() <= k {
                continue;
            }
            neighbor_list.sort_by(|&a, &b| {
                let da = self.distances[&(demand_idx, a)];
                let db = self.distances[&(demand_idx, b)];
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
            let dropped: Vec<usize> = neighbor_list.split_off(k);
            for facility_idx in dropped {
                self.distances.remove(&(demand_idx, facility_idx));
            }
        }
    }

    /// Demand indices with no reachable facility at all.
    pub fn uncovered(&self) -> Vec<usize> {
        self.neighbors
            .iter()
            .enumerate()
            .filter_map(|(i, n)| if n.is_empty() { Some(i) } else { None })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_self_distance_is_zero() {
        assert!(haversine_miles(33.7, -84.4, 33.7, -84.4) < 1e-9);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = haversine_miles(33.7, -84.4, 34.0, -84.0);
        let b = haversine_miles(34.0, -84.0, 33.7, -84.4);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn prune_keeps_k_closest() {
        let mut m = DistanceMatrix::new(1);
        m.insert(0, 0, 10.0);
        m.insert(0, 1, 2.0);
        m.insert(0, 2, 5.0);
        m.prune_k_nearest(2);
        assert_eq!(m.neighbors[0].len(), 2);
        assert!(m.get(0, 1).is_some());
        assert!(m.get(0, 2).is_some());
        assert!(m.get(0, 0).is_none());
    }

    #[test]
    fn uncovered_reports_empty_neighbor_rows() {
        let mut m = DistanceMatrix::new(2);
        m.insert(0, 0, 1.0);
        assert_eq!(m.uncovered(), vec![1]);
    }
}
