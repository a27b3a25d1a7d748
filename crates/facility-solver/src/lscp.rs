use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};

use crate::context::FormulationContext;
use crate::error::{Result, SolverError};
use crate::status::SolverStatus;

/// Location Set Covering solution: fewest open facilities such that every
/// demand point has at least one open facility within `radius_miles`.
#[derive(Debug, Clone)]
pub struct LscpResult {
    pub status: SolverStatus,
    pub opened: Vec<usize>,
    pub min_facilities: usize,
}

pub fn solve_lscp(ctx: &FormulationContext, radius_miles: f64) -> Result<LscpResult> {
    let coverage = ctx.covering_neighbors(radius_miles);
    let uncovered_count = coverage.iter().filter(|n| n.is_empty()).count();
    if uncovered_count > 0 {
        return Err(SolverError::Coverage { model: "lscp", uncovered_count });
    }

    let n_facility = ctx.facilities.len();
    let mut vars = variables!();
    let y: Vec<Variable> = (0..n_facility).map(|_| vars.add(variable().binary())).collect();

    let mut objective = Expression::from(0.0);
    for &yv in &y {
        objective += yv;
    }

    let mut model = vars.minimise(objective.clone()).using(coin_cbc);

    for neighbors in &coverage {
        let mut expr = Expression::from(0.0);
        for &j in neighbors {
            expr += y[j];
        }
        model = model.with(constraint!(expr >= 1));
    }

    match model.solve() {
        Ok(solution) => {
            let opened: Vec<usize> = y
                .iter()
                .enumerate()
                .filter(|(_, &v)| solution.value(v) > 0.5)
                .map(|(j, _)| j)
                .collect();
            Ok(LscpResult { status: SolverStatus::Optimal, min_facilities: opened.len(), opened })
        }
        Err(e) => {
            Ok(LscpResult { status: SolverStatus::Other(e.to_string()), opened: Vec::new(), min_facilities: 0 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_core::{DemandPoint, DistanceMatrix, FacilityCandidate};

    #[test]
    fn rejects_when_a_demand_has_no_covering_facility() {
        let demand = vec![DemandPoint::new("d0", 0.0, 0.0, 1.0)];
        let facilities = vec![FacilityCandidate::new("f0", 0.0, 0.0, 100.0)];
        let mut matrix = DistanceMatrix::new(1);
        matrix.insert(0, 0, 50.0);
        let ctx = FormulationContext::new(&demand, &facilities, &matrix);
        let err = solve_lscp(&ctx, 5.0).unwrap_err();
        assert_eq!(err, SolverError::Coverage { model: "lscp", uncovered_count: 1 });
    }
}
