use geo_core::SchoolRecord;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::{DataError, Result};

/// Join used against the approved-schools table and its demographic
/// companion table. Block group is left unselected: the production schema
/// this was modeled on does not expose one directly on the schools table,
/// matching the commented-out column in the original query.
const SCHOOL_QUERY: &str = r#"
    SELECT
      s."UNIQUESCHOOLID"::text                      AS id,
      s.lat::float8                                 AS latitude,
      s.lon::float8                                 AS longitude,
      COALESCE(g."CS_Enrollment", 0)::float8        AS cs_enrollment,
      COALESCE(g."Certified_Teachers", 0)::float8   AS certified_teachers,
      g."RI_Asian"::float8                          AS ri_asian,
      g."RI_Black"::float8                          AS ri_black,
      g."RI_Hispanic"::float8                       AS ri_hispanic,
      g."RI_White"::float8                          AS ri_white,
      g."RI_Female"::float8                         AS ri_female
    FROM "2024"."tbl_approvedschools" s
    LEFT JOIN census.gadoe2024 g
      ON g."UNIQUESCHOOLID" = s."UNIQUESCHOOLID"
    WHERE s.lat IS NOT NULL AND s.lon IS NOT NULL
"#;

/// Read-only adapter over the schools/demographics join.
pub struct SchoolsRepository {
    pool: PgPool,
}

impl SchoolsRepository {
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .test_before_acquire(true)
            .connect(&config.connection_string())
            .await
            .map_err(DataError::Connection)?;
        Ok(SchoolsRepository { pool })
    }

    /// Runs the join query and applies the same cleaning pass the original
    /// pipeline does: drop rows with missing/out-of-range/null-island
    /// coordinates, clip enrollment and teacher counts to non-negative.
    pub async fn fetch_schools(&self) -> Result<Vec<SchoolRecord>> {
        let rows = sqlx::query(SCHOOL_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::Query)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for row in &rows {
            let id: String = row.try_get("id").unwrap_or_default();
            let latitude: f64 = row.try_get("latitude").unwrap_or(f64::NAN);
            let longitude: f64 = row.try_get("longitude").unwrap_or(f64::NAN);
            let cs_enrollment: f64 = row.try_get("cs_enrollment").unwrap_or(0.0);
            let certified_teachers: f64 = row.try_get("certified_teachers").unwrap_or(0.0);
            let ri_asian: Option<f64> = row.try_get("ri_asian").ok();
            let ri_black: Option<f64> = row.try_get("ri_black").ok();
            let ri_hispanic: Option<f64> = row.try_get("ri_hispanic").ok();
            let ri_white: Option<f64> = row.try_get("ri_white").ok();
            let ri_female: Option<f64> = row.try_get("ri_female").ok();

            match SchoolRecord::new(
                id,
                latitude,
                longitude,
                cs_enrollment,
                certified_teachers,
                ri_asian,
                ri_black,
                ri_hispanic,
                ri_white,
                ri_female,
                None,
            ) {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "dropped school rows that failed validation");
        }
        info!(loaded = records.len(), "fetched school records");

        if records.is_empty() {
            return Err(DataError::NoValidRecords);
        }
        Ok(records)
    }
}
