/// Earth radius used by the web mercator (EPSG:3857) sphere approximation.
const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Web mercator's latitude limit, past which `y` diverges.
const MAX_LAT: f64 = 85.051_129;

/// Projects a WGS84 lat/lon pair to web mercator (EPSG:3857) meters. All
/// map rendering works in this projected space; any distance that must be
/// drawn geometrically (a coverage radius) is converted to meters the same
/// way (miles * 1609.344) before it is used here.
pub fn project_mercator(lat: f64, lon: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LAT, MAX_LAT);
    let x = EARTH_RADIUS_METERS * lon.to_radians();
    let y = EARTH_RADIUS_METERS * ((std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln());
    (x, y)
}

/// Converts a distance in miles to the equivalent span in projected meters.
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * 1609.344
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_prime_meridian_is_origin() {
        let (x, y) = project_mercator(0.0, 0.0);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn longitude_scales_linearly() {
        let (x1, _) = project_mercator(0.0, 10.0);
        let (x2, _) = project_mercator(0.0, 20.0);
        assert!((x2 - 2.0 * x1).abs() < 1e-6);
    }
}
