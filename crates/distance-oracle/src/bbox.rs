use geo_core::{DemandPoint, FacilityCandidate};

/// Minimum span, in degrees, enforced on each axis so a single-point study
/// area still yields a sane (non-zero-area) bounding box.
const MIN_SPAN_DEGREES: f64 = 1e-4;

/// Lower bound on the network download radius, regardless of how tight the
/// study area is.
pub const MIN_RADIUS_MILES: f64 = 10.0;

const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// Bounding box around a set of demand and facility points, widened to a
/// minimum span so degenerate (single-point) inputs still produce a usable
/// download region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn around(demand: &[DemandPoint], facilities: &[FacilityCandidate]) -> Self {
        let lats = demand
            .iter()
            .map(|d| d.latitude)
            .chain(facilities.iter().map(|f| f.latitude));
        let lons = demand
            .iter()
            .map(|d| d.longitude)
            .chain(facilities.iter().map(|f| f.longitude));

        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        for lat in lats {
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
        }
        for lon in lons {
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
        }
        if !min_lat.is_finite() {
            min_lat = 0.0;
            max_lat = 0.0;
            min_lon = 0.0;
            max_lon = 0.0;
        }

        let mut bbox = BoundingBox { min_lat, max_lat, min_lon, max_lon };
        bbox.widen_to_minimum();
        bbox
    }

    fn widen_to_minimum(&mut self) {
        if self.max_lat - self.min_lat < MIN_SPAN_DEGREES {
            let mid = (self.max_lat + self.min_lat) / 2.0;
            self.min_lat = mid - MIN_SPAN_DEGREES / 2.0;
            self.max_lat = mid + MIN_SPAN_DEGREES / 2.0;
        }
        if self.max_lon - self.min_lon < MIN_SPAN_DEGREES {
            let mid = (self.max_lon + self.min_lon) / 2.0;
            self.min_lon = mid - MIN_SPAN_DEGREES / 2.0;
            self.max_lon = mid + MIN_SPAN_DEGREES / 2.0;
        }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_lat + self.max_lat) / 2.0, (self.min_lon + self.max_lon) / 2.0)
    }

    /// Rough diagonal span in miles, used to size the network download radius.
    pub fn span_miles(&self) -> f64 {
        let lat_miles = (self.max_lat - self.min_lat) * MILES_PER_DEGREE_LAT;
        let lon_miles =
            (self.max_lon - self.min_lon) * MILES_PER_DEGREE_LAT * self.center().0.to_radians().cos().abs();
        lat_miles.hypot(lon_miles)
    }

    /// Download radius in meters for the network back-end: the smaller of a
    /// caller-supplied cap and 0.75x the bbox span, floored at
    /// [`MIN_RADIUS_MILES`].
    pub fn download_radius_meters(&self, radius_cap_miles: f64) -> f64 {
        let candidate_miles = radius_cap_miles.min(0.75 * self.span_miles());
        candidate_miles.max(MIN_RADIUS_MILES) * 1609.344
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(lat: f64, lon: f64) -> DemandPoint {
        DemandPoint::new("d", lat, lon, 0.5)
    }

    #[test]
    fn widens_degenerate_single_point_box() {
        let bbox = BoundingBox::around(&[demand(33.7, -84.4)], &[]);
        assert!(bbox.max_lat - bbox.min_lat >= MIN_SPAN_DEGREES);
        assert!(bbox.max_lon - bbox.min_lon >= MIN_SPAN_DEGREES);
    }

    #[test]
    fn radius_floors_at_minimum() {
        let bbox = BoundingBox::around(&[demand(33.7, -84.4)], &[]);
        let radius = bbox.download_radius_meters(5.0);
        assert_eq!(radius, MIN_RADIUS_MILES * 1609.344);
    }
}
