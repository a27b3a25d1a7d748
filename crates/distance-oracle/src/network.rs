use geo_core::{DemandPoint, DistanceMatrix, FacilityCandidate};
use serde::Deserialize;
use tracing::{info, warn};

use crate::bbox::BoundingBox;
use crate::error::{OracleError, Result};

/// Road-network back-end, grounded on an OSRM Table service rather than a
/// locally downloaded graph: OSRM already does the bbox-centered graph
/// fetch, node snapping, and single-source shortest path work server-side,
/// so the client only needs to shape the request and convert the response.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub base_url: String,
    pub profile: String,
    pub radius_cap_miles: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            base_url: std::env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
            profile: "driving".to_string(),
            radius_cap_miles: 25.0,
        }
    }
}

pub struct NetworkBackend {
    client: reqwest::Client,
    config: NetworkConfig,
}

impl NetworkBackend {
    pub fn new(config: NetworkConfig) -> Self {
        NetworkBackend { client: reqwest::Client::new(), config }
    }

    /// Overrides the configured radius cap. Unlike the Python original's
    /// subgraph-download radius, OSRM's own routing graph already bounds
    /// reachability, so this value is only used to cap how far OSRM's
    /// fallback matching will snap a point to the road network, via OSRM's
    /// `radiuses` table-request field.
    pub fn with_radius_cap(mut self, radius_cap_miles: f64) -> Self {
        self.config.radius_cap_miles = radius_cap_miles;
        self
    }

    /// Runs the table query and converts the response into a sparse
    /// distance matrix, in miles. Pairs OSRM reports as unreachable are
    /// simply omitted, matching the spec's "pairs to unreachable facilities
    /// are omitted" rule.
    pub async fn build(
        &self,
        demand: &[DemandPoint],
        facilities: &[FacilityCandidate],
    ) -> Result<DistanceMatrix> {
        let bbox = BoundingBox::around(demand, facilities);
        let radius_m = bbox.download_radius_meters(self.config.radius_cap_miles);
        let (center_lat, center_lon) = bbox.center();
        info!(
            center_lat,
            center_lon, radius_m, "network backend querying OSRM table service"
        );

        let url = build_table_url(&self.config.base_url, &self.config.profile, demand, facilities, radius_m);

        let response = self.client.get(&url).send().await.map_err(OracleError::Request)?;
        let body: TableResponse = response.json().await.map_err(OracleError::Request)?;
        if body.code != "Ok" {
            return Err(OracleError::BadStatus(body.code));
        }
        let rows = body.distances.ok_or(OracleError::ShapeMismatch)?;
        matrix_from_rows(rows, demand.len(), facilities.len())
    }
}

fn build_table_url(
    base_url: &str,
    profile: &str,
    demand: &[DemandPoint],
    facilities: &[FacilityCandidate],
    radius_m: f64,
) -> String {
    let coords: Vec<String> = demand
        .iter()
        .map(|d| format!("{:.6},{:.6}", d.longitude, d.latitude))
        .chain(facilities.iter().map(|f| format!("{:.6},{:.6}", f.longitude, f.latitude)))
        .collect();
    let source_indices: Vec<String> = (0..demand.len()).map(|i| i.to_string()).collect();
    let destination_indices: Vec<String> = (demand.len()..demand.len() + facilities.len())
        .map(|i| i.to_string())
        .collect();
    // One radius per coordinate, in the same order as `coords`, capping how
    // far OSRM will search to snap each point onto the road network.
    let radiuses = vec![format!("{radius_m:.0}"); coords.len()].join(";");

    format!(
        "{base_url}/table/v1/{profile}/{}?sources={}&destinations={}&annotations=distance&radiuses={}",
        coords.join(";"),
        source_indices.join(";"),
        destination_indices.join(";"),
        radiuses,
    )
}

fn matrix_from_rows(
    rows: Vec<Vec<Option<f64>>>,
    demand_count: usize,
    facility_count: usize,
) -> Result<DistanceMatrix> {
    if rows.len() != demand_count {
        return Err(OracleError::ShapeMismatch);
    }
    let mut matrix = DistanceMatrix::new(demand_count);
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != facility_count {
            return Err(OracleError::ShapeMismatch);
        }
        for (j, meters) in row.into_iter().enumerate() {
            match meters {
                Some(m) => matrix.insert(i, j, m / 1609.344),
                None => warn!(demand = i, facility = j, "OSRM reports this pair unreachable"),
            }
        }
    }
    Ok(matrix)
}

#[derive(Debug, Deserialize)]
struct TableResponse {
    code: String,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_indexes_sources_before_destinations() {
        let demand = vec![DemandPoint::new("d0", 33.7, -84.4, 0.5)];
        let facilities = vec![
            FacilityCandidate::new("f0", 33.8, -84.3, 100.0),
            FacilityCandidate::new("f1", 33.9, -84.2, 100.0),
        ];
        let url = build_table_url("https://osrm.example", "driving", &demand, &facilities, 16093.4);
        assert!(url.contains("sources=0"));
        assert!(url.contains("destinations=1;2"));
        assert!(url.starts_with("https://osrm.example/table/v1/driving/"));
    }

    #[test]
    fn url_carries_one_radius_per_coordinate() {
        let demand = vec![DemandPoint::new("d0", 33.7, -84.4, 0.5)];
        let facilities = vec![
            FacilityCandidate::new("f0", 33.8, -84.3, 100.0),
            FacilityCandidate::new("f1", 33.9, -84.2, 100.0),
        ];
        let url = build_table_url("https://osrm.example", "driving", &demand, &facilities, 16093.4);
        assert!(url.contains("radiuses=16093;16093;16093"));
    }

    #[test]
    fn with_radius_cap_overrides_the_default() {
        let backend = NetworkBackend::new(NetworkConfig::default()).with_radius_cap(8.0);
        assert_eq!(backend.config.radius_cap_miles, 8.0);
    }

    #[test]
    fn unreachable_pairs_are_dropped() {
        let rows = vec![vec![Some(1609.344), None]];
        let matrix = matrix_from_rows(rows, 1, 2).unwrap();
        assert!(matrix.get(0, 0).is_some());
        assert!(matrix.get(0, 1).is_none());
        assert_eq!(matrix.neighbors[0], vec![0]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let rows = vec![vec![Some(1.0)]];
        assert!(matrix_from_rows(rows, 2, 1).is_err());
    }
}
