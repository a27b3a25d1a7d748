use geo_core::{DemandPoint, DistanceMatrix, FacilityCandidate};

/// Shared input the three models formulate over: the demand/facility
/// tables and the distance matrix between them. Each `solve_*` function
/// extends this with its own variables rather than keeping a separate copy
/// of the symbol table.
pub struct FormulationContext<'a> {
    pub demand: &'a [DemandPoint],
    pub facilities: &'a [FacilityCandidate],
    pub matrix: &'a DistanceMatrix,
}

impl<'a> FormulationContext<'a> {
    pub fn new(
        demand: &'a [DemandPoint],
        facilities: &'a [FacilityCandidate],
        matrix: &'a DistanceMatrix,
    ) -> Self {
        FormulationContext { demand, facilities, matrix }
    }

    /// Per-demand facility indices within `radius_miles`, used by LSCP and
    /// MCLP. Only considers pairs the distance matrix actually carries (so
    /// k-nearest pruning upstream still applies here).
    pub fn covering_neighbors(&self, radius_miles: f64) -> Vec<Vec<usize>> {
        self.matrix
            .neighbors
            .iter()
            .enumerate()
            .map(|(i, neighbors)| {
                neighbors
                    .iter()
                    .copied()
                    .filter(|&j| self.matrix.get(i, j).map_or(false, |d| d <= radius_miles))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_neighbors_filters_by_radius() {
        let demand = vec![DemandPoint::new("d0", 0.0, 0.0, 0.5)];
        let facilities = vec![
            FacilityCandidate::new("f0", 0.0, 0.0, 100.0),
            FacilityCandidate::new("f1", 0.0, 0.0, 100.0),
        ];
        let mut matrix = DistanceMatrix::new(1);
        matrix.insert(0, 0, 2.0);
        matrix.insert(0, 1, 8.0);
        let ctx = FormulationContext::new(&demand, &facilities, &matrix);
        assert_eq!(ctx.covering_neighbors(5.0), vec![vec![0]]);
    }
}
