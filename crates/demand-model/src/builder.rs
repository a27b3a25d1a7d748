use std::collections::HashMap;

use geo_core::{DemandPoint, FacilityCandidate, SchoolRecord};

use crate::metric::DemandMetric;
use crate::normalize::normalize_01;

/// Computes the raw (unnormalized) demand series for one metric, one value
/// per school, in the same order as `records`.
fn raw_metric_series(records: &[SchoolRecord], metric: DemandMetric) -> Vec<Option<f64>> {
    match metric {
        DemandMetric::Sfr => records
            .iter()
            .map(|r| {
                if r.certified_teachers == 0.0 {
                    // No teachers on record: fall back to enrollment rather
                    // than producing an infinite or undefined ratio.
                    Some(r.cs_enrollment)
                } else {
                    Some(r.cs_enrollment / r.certified_teachers)
                }
            })
            .collect(),
        DemandMetric::CsEnrollment => records.iter().map(|r| Some(r.cs_enrollment)).collect(),
        DemandMetric::CertifiedTeachers => records.iter().map(|r| Some(r.certified_teachers)).collect(),
        DemandMetric::RiAsian => records.iter().map(|r| r.ri_asian).collect(),
        DemandMetric::RiBlack => records.iter().map(|r| r.ri_black).collect(),
        DemandMetric::RiHispanic => records.iter().map(|r| r.ri_hispanic).collect(),
        DemandMetric::RiWhite => records.iter().map(|r| r.ri_white).collect(),
        DemandMetric::RiFemale => records.iter().map(|r| r.ri_female).collect(),
    }
}

/// Builds one demand point and one facility candidate per school for the
/// requested metric, normalizing demand to `[0,1]` and deriving facility
/// capacity from certified teacher counts.
pub fn build_demand_and_facilities(
    records: &[SchoolRecord],
    metric: DemandMetric,
    seats_per_teacher: f64,
) -> (Vec<DemandPoint>, Vec<FacilityCandidate>) {
    let raw = raw_metric_series(records, metric);
    let normalized = normalize_01(&raw);

    let demand = records
        .iter()
        .zip(normalized.iter())
        .map(|(r, &d)| DemandPoint::new(r.id.clone(), r.latitude, r.longitude, d))
        .collect();

    let facilities = records
        .iter()
        .map(|r| {
            FacilityCandidate::from_teacher_count(
                r.id.clone(),
                r.latitude,
                r.longitude,
                r.certified_teachers,
                seats_per_teacher,
            )
        })
        .collect();

    (demand, facilities)
}

/// Enrollment-weighted block-group aggregation: collapses schools sharing a
/// `block_group` into one demand/facility pair per group, with the centroid
/// and demand value weighted by enrollment (floored at 1 so a zero-
/// enrollment school doesn't zero out the whole group's weight).
pub fn aggregate_by_block_group(
    records: &[SchoolRecord],
    demand: &[DemandPoint],
    seats_per_teacher: f64,
) -> Option<(Vec<DemandPoint>, Vec<FacilityCandidate>)> {
    if records.iter().all(|r| r.block_group.is_none()) {
        return None;
    }

    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if let Some(bg) = &record.block_group {
            groups.entry(bg.clone()).or_default().push(idx);
        }
    }

    let mut demand_out = Vec::with_capacity(groups.len());
    let mut facilities_out = Vec::with_capacity(groups.len());

    for (bg, indices) in groups {
        let weights: Vec<f64> = indices.iter().map(|&i| records[i].cs_enrollment.max(1.0)).collect();
        let total_weight: f64 = weights.iter().sum();

        let lat = weighted_mean(indices.iter().map(|&i| records[i].latitude), &weights, total_weight);
        let lon = weighted_mean(indices.iter().map(|&i| records[i].longitude), &weights, total_weight);
        let demand_val = weighted_mean(indices.iter().map(|&i| demand[i].demand), &weights, total_weight);

        let teachers_sum: f64 = indices.iter().map(|&i| records[i].certified_teachers).sum();

        demand_out.push(DemandPoint::new(bg.clone(), lat, lon, demand_val));
        facilities_out.push(FacilityCandidate::from_teacher_count(
            bg,
            lat,
            lon,
            teachers_sum,
            seats_per_teacher,
        ));
    }

    Some((demand_out, facilities_out))
}

fn weighted_mean(values: impl Iterator<Item = f64>, weights: &[f64], total_weight: f64) -> f64 {
    let sum: f64 = values.zip(weights.iter()).map(|(v, w)| v * w).sum();
    if total_weight <= 0.0 {
        0.0
    } else {
        sum / total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(id: &str, enrollment: f64, teachers: f64, bg: Option<&str>) -> SchoolRecord {
        SchoolRecord::new(
            id,
            33.7,
            -84.4,
            enrollment,
            teachers,
            None,
            None,
            None,
            None,
            None,
            bg.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn sfr_falls_back_to_enrollment_when_no_teachers() {
        let records = vec![school("a", 100.0, 0.0, None), school("b", 200.0, 20.0, None)];
        let (demand, _) = build_demand_and_facilities(&records, DemandMetric::Sfr, 5.0);
        // a: sfr raw = 100 (fallback); b: sfr raw = 200/20 = 10 -> a has the larger raw value
        assert_eq!(demand[0].demand, 1.0);
        assert_eq!(demand[1].demand, 0.0);
    }

    #[test]
    fn facility_capacity_uses_teacher_seats() {
        let records = vec![school("a", 100.0, 10.0, None)];
        let (_, facilities) = build_demand_and_facilities(&records, DemandMetric::CsEnrollment, 5.0);
        assert_eq!(facilities[0].capacity, 50.0);
    }

    #[test]
    fn block_group_aggregation_weights_by_enrollment() {
        let records = vec![school("a", 10.0, 5.0, Some("bg1")), school("b", 30.0, 15.0, Some("bg1"))];
        let (demand, _) = build_demand_and_facilities(&records, DemandMetric::CsEnrollment, 5.0);
        let agg = aggregate_by_block_group(&records, &demand, 5.0).unwrap();
        assert_eq!(agg.0.len(), 1);
        assert_eq!(agg.1[0].capacity, 100.0);
    }

    #[test]
    fn no_block_groups_returns_none() {
        let records = vec![school("a", 10.0, 5.0, None)];
        let (demand, _) = build_demand_and_facilities(&records, DemandMetric::CsEnrollment, 5.0);
        assert!(aggregate_by_block_group(&records, &demand, 5.0).is_none());
    }
}
