use std::fs;
use std::io;
use std::path::Path;

use geo_core::{DemandPoint, FacilityCandidate};
use serde_json::Value;

/// Writes a facilities CSV (`id, latitude, longitude[, capacity]`) for the
/// given opened facility indices. p-median carries capacity; LSCP and MCLP
/// don't.
pub fn write_facilities_csv(
    path: &Path,
    facilities: &[FacilityCandidate],
    opened: &[usize],
    with_capacity: bool,
) -> io::Result<()> {
    let mut out = String::from(if with_capacity {
        "id,latitude,longitude,capacity\n"
    } else {
        "id,latitude,longitude\n"
    });
    for &j in opened {
        let f = &facilities[j];
        if with_capacity {
            out.push_str(&format!("{},{},{},{}\n", f.id, f.latitude, f.longitude, f.capacity));
        } else {
            out.push_str(&format!("{},{},{}\n", f.id, f.latitude, f.longitude));
        }
    }
    fs::write(path, out)
}

/// Writes the p-median assignments CSV: `demand_idx, demand_id,
/// facility_idx, facility_id`.
pub fn write_assignments_csv(
    path: &Path,
    demand: &[DemandPoint],
    facilities: &[FacilityCandidate],
    assignments: &[(usize, usize)],
) -> io::Result<()> {
    let mut out = String::from("demand_idx,demand_id,facility_idx,facility_id\n");
    for &(i, j) in assignments {
        out.push_str(&format!("{},{},{},{}\n", i, demand[i].id, j, facilities[j].id));
    }
    fs::write(path, out)
}

pub fn write_json(path: &Path, value: &Value) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facilities_csv_includes_capacity_when_requested() {
        let dir = std::env::temp_dir().join(format!("scenario-jobs-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("facilities.csv");
        let facilities = vec![FacilityCandidate::new("f0", 33.7, -84.4, 100.0)];
        write_facilities_csv(&path, &facilities, &[0], true).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,latitude,longitude,capacity\n"));
        assert!(contents.contains("f0,33.7,-84.4,100"));
        fs::remove_dir_all(&dir).ok();
    }
}
