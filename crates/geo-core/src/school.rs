use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};

/// Null island is never a real school location; treat it as bad data, the
/// same way the original cleaning step drops rows with lat/lon both ~0.
const NULL_ISLAND_EPSILON: f64 = 1e-6;

/// One row of the schools/demographics join, cleaned and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cs_enrollment: f64,
    pub certified_teachers: f64,
    pub ri_asian: Option<f64>,
    pub ri_black: Option<f64>,
    pub ri_hispanic: Option<f64>,
    pub ri_white: Option<f64>,
    pub ri_female: Option<f64>,
    pub block_group: Option<String>,
}

impl SchoolRecord {
    /// Builds a record, clipping negative/NaN counts to zero and rejecting
    /// invalid or null-island coordinates (mirrors the original's
    /// `fillna(0).clip(lower=0)` cleaning pass).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        cs_enrollment: f64,
        certified_teachers: f64,
        ri_asian: Option<f64>,
        ri_black: Option<f64>,
        ri_hispanic: Option<f64>,
        ri_white: Option<f64>,
        ri_female: Option<f64>,
        block_group: Option<String>,
    ) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoError::InvalidCoordinates { lat: latitude, lon: longitude });
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidCoordinates { lat: latitude, lon: longitude });
        }
        if latitude.abs() < NULL_ISLAND_EPSILON && longitude.abs() < NULL_ISLAND_EPSILON {
            return Err(GeoError::NullIsland);
        }

        Ok(SchoolRecord {
            id: id.into(),
            latitude,
            longitude,
            cs_enrollment: clip_nonneg(cs_enrollment),
            certified_teachers: clip_nonneg(certified_teachers),
            ri_asian: drop_nan(ri_asian),
            ri_black: drop_nan(ri_black),
            ri_hispanic: drop_nan(ri_hispanic),
            ri_white: drop_nan(ri_white),
            ri_female: drop_nan(ri_female),
            block_group,
        })
    }
}

fn clip_nonneg(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Representation indices are signed (spec.md §3: "roughly [-1,1]") and must
/// not be floored at zero; only a `NaN` reading collapses to absent.
fn drop_nan(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = SchoolRecord::new("s1", 95.0, -80.0, 1.0, 1.0, None, None, None, None, None, None)
            .unwrap_err();
        assert_eq!(err, GeoError::InvalidCoordinates { lat: 95.0, lon: -80.0 });
    }

    #[test]
    fn rejects_null_island() {
        let err = SchoolRecord::new("s1", 0.0, 0.0, 1.0, 1.0, None, None, None, None, None, None)
            .unwrap_err();
        assert_eq!(err, GeoError::NullIsland);
    }

    #[test]
    fn clips_negative_and_nan_counts() {
        let rec = SchoolRecord::new(
            "s1", 33.7, -84.4, -5.0, f64::NAN, None, None, None, None, None, None,
        )
        .unwrap();
        assert_eq!(rec.cs_enrollment, 0.0);
        assert_eq!(rec.certified_teachers, 0.0);
    }

    #[test]
    fn representation_indices_keep_their_sign() {
        let rec = SchoolRecord::new(
            "s1", 33.7, -84.4, 10.0, 1.0, Some(-0.4), None, None, None, None, None,
        )
        .unwrap();
        assert_eq!(rec.ri_asian, Some(-0.4));
    }

    #[test]
    fn nan_representation_index_becomes_absent() {
        let rec = SchoolRecord::new(
            "s1", 33.7, -84.4, 10.0, 1.0, Some(f64::NAN), None, None, None, None, None,
        )
        .unwrap();
        assert_eq!(rec.ri_asian, None);
    }
}
