use crate::mercator::project_mercator;

/// Minimum projected span, in meters, enforced so a single-point or
/// perfectly colinear study area still produces a usable view.
const MIN_SPAN_METERS: f64 = 1_000.0;

/// Fraction of the view reserved as padding around the tightest bounding
/// box of plotted points.
const PADDING_FRACTION: f64 = 0.08;

/// Maps WGS84 lat/lon into pixel space via web mercator, fit to a bounding
/// box over a set of points with padding, matching a "tight bounding box"
/// basemap view rather than a fixed global projection.
pub struct MapView {
    pub width: u32,
    pub height: u32,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl MapView {
    pub fn fit(points: impl Iterator<Item = (f64, f64)>, width: u32, height: u32) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for (lat, lon) in points {
            let (x, y) = project_mercator(lat, lon);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        if !min_x.is_finite() {
            min_x = 0.0;
            max_x = 0.0;
            min_y = 0.0;
            max_y = 0.0;
        }

        widen(&mut min_x, &mut max_x);
        widen(&mut min_y, &mut max_y);

        let pad_x = (max_x - min_x) * PADDING_FRACTION;
        let pad_y = (max_y - min_y) * PADDING_FRACTION;

        MapView {
            width,
            height,
            min_x: min_x - pad_x,
            max_x: max_x + pad_x,
            min_y: min_y - pad_y,
            max_y: max_y + pad_y,
        }
    }

    /// Projects a WGS84 coordinate to pixel space. Image `y` grows downward
    /// while mercator `y` grows north, so north is flipped to the top.
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (x, y) = project_mercator(lat, lon);
        let fx = (x - self.min_x) / (self.max_x - self.min_x);
        let fy = 1.0 - (y - self.min_y) / (self.max_y - self.min_y);
        (fx * self.width as f64, fy * self.height as f64)
    }

    /// Converts a span in projected meters (e.g. a coverage radius already
    /// multiplied by 1609.344) into pixels at this view's scale.
    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        meters / (self.max_x - self.min_x) * self.width as f64
    }
}

fn widen(min: &mut f64, max: &mut f64) {
    if *max - *min < MIN_SPAN_METERS {
        let mid = (*max + *min) / 2.0;
        *min = mid - MIN_SPAN_METERS / 2.0;
        *max = mid + MIN_SPAN_METERS / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_points_within_the_canvas() {
        let points = vec![(33.7, -84.4), (34.0, -84.0)];
        let view = MapView::fit(points.into_iter(), 800, 600);
        let (x, y) = view.project(33.85, -84.2);
        assert!(x >= 0.0 && x <= 800.0);
        assert!(y >= 0.0 && y <= 600.0);
    }

    #[test]
    fn single_point_still_produces_a_usable_view() {
        let view = MapView::fit(std::iter::once((33.7, -84.4)), 400, 400);
        let (x, y) = view.project(33.7, -84.4);
        assert!((x - 200.0).abs() < 1.0);
        assert!((y - 200.0).abs() < 1.0);
    }
}
