use thiserror::Error;

/// Errors raised while constructing or validating the core geospatial types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("coordinates fall on null island (0, 0)")]
    NullIsland,

    #[error("dataset is empty after cleaning")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, GeoError>;
