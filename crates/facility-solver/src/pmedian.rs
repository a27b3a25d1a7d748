use std::collections::HashMap;

use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};

use crate::context::FormulationContext;
use crate::error::{Result, SolverError};
use crate::status::SolverStatus;

/// Capacitated p-median solution: every demand assigned to exactly one of
/// `p` open facilities, minimizing total demand-weighted miles, subject to
/// per-facility capacity.
#[derive(Debug, Clone)]
pub struct PmedianResult {
    pub status: SolverStatus,
    pub objective_miles: f64,
    pub opened: Vec<usize>,
    /// (demand_idx, facility_idx) pairs.
    pub assignments: Vec<(usize, usize)>,
}

pub fn solve_pmedian(ctx: &FormulationContext, p: usize) -> Result<PmedianResult> {
    let uncovered = ctx.matrix.uncovered();
    if !uncovered.is_empty() {
        return Err(SolverError::Coverage { model: "pmedian", uncovered_count: uncovered.len() });
    }

    let n_facility = ctx.facilities.len();

    let mut vars = variables!();
    let y: Vec<Variable> = (0..n_facility).map(|_| vars.add(variable().binary())).collect();

    let mut x: HashMap<(usize, usize), Variable> = HashMap::new();
    let mut neighbors_by_facility: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, neighbors) in ctx.matrix.neighbors.iter().enumerate() {
        for &j in neighbors {
            x.insert((i, j), vars.add(variable().binary()));
            neighbors_by_facility.entry(j).or_default().push(i);
        }
    }

    let mut objective = Expression::from(0.0);
    for (&(i, j), &xv) in &x {
        let miles = ctx.matrix.get(i, j).expect("neighbor pair always has a distance");
        objective += ctx.demand[i].demand * miles * xv;
    }

    let mut model = vars.minimise(objective.clone()).using(coin_cbc);

    for (i, neighbors) in ctx.matrix.neighbors.iter().enumerate() {
        let mut expr = Expression::from(0.0);
        for &j in neighbors {
            expr += x[&(i, j)];
        }
        model = model.with(constraint!(expr == 1));
    }

    let mut open_sum = Expression::from(0.0);
    for &yv in &y {
        open_sum += yv;
    }
    model = model.with(constraint!(open_sum == p as f64));

    for (&(i, j), &xv) in &x {
        let _ = i;
        model = model.with(constraint!(xv <= y[j]));
    }

    for (j, facility) in ctx.facilities.iter().enumerate() {
        let Some(served_by) = neighbors_by_facility.get(&j) else { continue };
        let mut load = Expression::from(0.0);
        for &i in served_by {
            load += ctx.demand[i].demand * x[&(i, j)];
        }
        model = model.with(constraint!(load <= facility.capacity * y[j]));
    }

    match model.solve() {
        Ok(solution) => {
            let opened = y
                .iter()
                .enumerate()
                .filter(|(_, &v)| solution.value(v) > 0.5)
                .map(|(j, _)| j)
                .collect();
            let assignments = x
                .iter()
                .filter(|(_, &v)| solution.value(v) > 0.5)
                .map(|(&(i, j), _)| (i, j))
                .collect();
            Ok(PmedianResult {
                status: SolverStatus::Optimal,
                objective_miles: solution.eval(objective.clone()),
                opened,
                assignments,
            })
        }
        Err(e) => Ok(PmedianResult {
            status: SolverStatus::Other(e.to_string()),
            objective_miles: 0.0,
            opened: Vec::new(),
            assignments: Vec::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_core::{DemandPoint, DistanceMatrix, FacilityCandidate};

    #[test]
    fn rejects_uncovered_demand_before_solving() {
        let demand = vec![DemandPoint::new("d0", 0.0, 0.0, 1.0)];
        let facilities = vec![FacilityCandidate::new("f0", 0.0, 0.0, 100.0)];
        let matrix = DistanceMatrix::new(1);
        let ctx = FormulationContext::new(&demand, &facilities, &matrix);
        let err = solve_pmedian(&ctx, 1).unwrap_err();
        assert_eq!(err, SolverError::Coverage { model: "pmedian", uncovered_count: 1 });
    }
}
