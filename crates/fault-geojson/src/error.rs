//! Error types for corner projection and GeoJSON assembly.

use fault_common::FaultError;
use projection::ProjectionError;
use thiserror::Error;

/// Result type alias using GeoJsonError.
pub type GeoJsonResult<T> = Result<T, GeoJsonError>;

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error(transparent)]
    Fault(#[from] FaultError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
