use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use facility_solver::{LscpResult, MclpResult, PmedianResult};
use geo_core::{haversine_miles, DemandPoint, FacilityCandidate};

use crate::canvas::{Canvas, Color};
use crate::error::Result;
use crate::mercator::miles_to_meters;
use crate::view::MapView;

const CANVAS_WIDTH: u32 = 1600;
const CANVAS_HEIGHT: u32 = 1200;
const MIN_MARKER_RADIUS: f64 = 8.0;
const MAX_MARKER_RADIUS: f64 = 60.0;
const FACILITY_MARKER_HALF_SIDE: f64 = 9.0;
const LSCP_DEMAND_DOT_RADIUS: f64 = 6.0;

/// Default bound on the number of spider assignment lines drawn for the
/// p-median map, to keep dense scenarios legible.
pub const DEFAULT_SPIDER_SAMPLE: usize = 500;

/// Default seed for the spider-line subsample. Map rendering must stay
/// reproducible in tests, so the subsample is drawn from a seeded `StdRng`
/// rather than a thread-local generator.
pub const DEFAULT_SPIDER_SEED: u64 = 0x5350_4944_4552;

fn marker_radius(demand: f64) -> f64 {
    MIN_MARKER_RADIUS + demand.clamp(0.0, 1.0) * (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS)
}

fn fit_view(demand: &[DemandPoint], facilities: &[FacilityCandidate]) -> MapView {
    let points = demand
        .iter()
        .map(|d| (d.latitude, d.longitude))
        .chain(facilities.iter().map(|f| (f.latitude, f.longitude)));
    MapView::fit(points, CANVAS_WIDTH, CANVAS_HEIGHT)
}

/// p-median map: demand sized by normalized demand, selected facilities as
/// squares, with a deterministically subsampled "spider" line from each
/// assignment so the rendered map is reproducible for a given `seed`.
pub fn render_pmedian(
    demand: &[DemandPoint],
    facilities: &[FacilityCandidate],
    result: &PmedianResult,
    sample_assignments: usize,
    seed: u64,
    path: impl AsRef<Path>,
) -> Result<()> {
    let view = fit_view(demand, facilities);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Color::BACKGROUND);

    let bound = if sample_assignments == 0 { DEFAULT_SPIDER_SAMPLE } else { sample_assignments };
    let assignments: Vec<(usize, usize)> = if result.assignments.len() > bound {
        let mut rng = StdRng::seed_from_u64(seed);
        result.assignments.choose_multiple(&mut rng, bound).copied().collect()
    } else {
        result.assignments.clone()
    };
    for (i, j) in assignments {
        let (dx, dy) = view.project(demand[i].latitude, demand[i].longitude);
        let (fx, fy) = view.project(facilities[j].latitude, facilities[j].longitude);
        canvas.draw_line(dx, dy, fx, fy, Color::SPIDER);
    }

    for d in demand {
        let (x, y) = view.project(d.latitude, d.longitude);
        canvas.fill_circle(x, y, marker_radius(d.demand), Color::DEMAND);
    }

    for &j in &result.opened {
        let f = &facilities[j];
        let (x, y) = view.project(f.latitude, f.longitude);
        canvas.fill_square(x, y, FACILITY_MARKER_HALF_SIDE, Color::FACILITY);
    }

    save(canvas, path)
}

/// LSCP map: low-opacity coverage buffers of radius `R` around each open
/// facility, with demand dots and open facilities overlaid.
pub fn render_lscp(
    demand: &[DemandPoint],
    facilities: &[FacilityCandidate],
    result: &LscpResult,
    radius_miles: f64,
    path: impl AsRef<Path>,
) -> Result<()> {
    let view = fit_view(demand, facilities);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Color::BACKGROUND);

    let radius_px = view.meters_to_pixels(miles_to_meters(radius_miles));
    for &j in &result.opened {
        let f = &facilities[j];
        let (x, y) = view.project(f.latitude, f.longitude);
        canvas.fill_circle_alpha(x, y, radius_px, Color::BUFFER, 0.25);
    }

    for d in demand {
        let (x, y) = view.project(d.latitude, d.longitude);
        canvas.fill_circle(x, y, LSCP_DEMAND_DOT_RADIUS, Color::DEMAND);
    }

    for &j in &result.opened {
        let f = &facilities[j];
        let (x, y) = view.project(f.latitude, f.longitude);
        canvas.fill_square(x, y, FACILITY_MARKER_HALF_SIDE, Color::FACILITY);
    }

    save(canvas, path)
}

/// MCLP map: demand colored by covered/uncovered state. Coverage is
/// recomputed on haversine distance to the nearest open facility, even
/// when the solver ran on network distances — an intentional divergence
/// from the solver's own metric, so tests must not assume they agree
/// point-for-point.
pub fn render_mclp(
    demand: &[DemandPoint],
    facilities: &[FacilityCandidate],
    result: &MclpResult,
    radius_miles: f64,
    path: impl AsRef<Path>,
) -> Result<()> {
    let view = fit_view(demand, facilities);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Color::BACKGROUND);

    let opened_coords: Vec<(f64, f64)> =
        result.opened.iter().map(|&j| (facilities[j].latitude, facilities[j].longitude)).collect();

    for d in demand {
        let covered = opened_coords
            .iter()
            .any(|&(flat, flon)| haversine_miles(d.latitude, d.longitude, flat, flon) <= radius_miles);
        let (x, y) = view.project(d.latitude, d.longitude);
        let color = if covered { Color::DEMAND } else { Color::DEMAND_UNCOVERED };
        canvas.fill_circle(x, y, marker_radius(d.demand), color);
    }

    for &j in &result.opened {
        let f = &facilities[j];
        let (x, y) = view.project(f.latitude, f.longitude);
        canvas.fill_square(x, y, FACILITY_MARKER_HALF_SIDE, Color::FACILITY);
    }

    save(canvas, path)
}

fn save(canvas: Canvas, path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    canvas.into_rgb_image().save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pmedian_render_is_reproducible_for_a_given_seed() {
        let demand: Vec<DemandPoint> =
            (0..20).map(|i| DemandPoint::new(format!("d{i}"), 33.0 + i as f64 * 0.01, -84.0, 0.5)).collect();
        let facilities: Vec<FacilityCandidate> =
            (0..3).map(|j| FacilityCandidate::new(format!("f{j}"), 33.0 + j as f64 * 0.1, -84.1, 100.0)).collect();
        let result = PmedianResult {
            status: facility_solver::SolverStatus::Optimal,
            objective_miles: 0.0,
            opened: vec![0, 1, 2],
            assignments: (0..20).map(|i| (i, i % 3)).collect(),
        };

        let dir = std::env::temp_dir().join(format!("map-renderer-test-{}", std::process::id()));
        let path_a = dir.join("a.png");
        let path_b = dir.join("b.png");
        render_pmedian(&demand, &facilities, &result, 5, 42, &path_a).unwrap();
        render_pmedian(&demand, &facilities, &result, 5, 42, &path_b).unwrap();
        let bytes_a = std::fs::read(&path_a).unwrap();
        let bytes_b = std::fs::read(&path_b).unwrap();
        assert_eq!(bytes_a, bytes_b);
        std::fs::remove_dir_all(&dir).ok();
    }
}
