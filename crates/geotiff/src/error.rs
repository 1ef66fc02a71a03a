//! Error types for GeoTIFF I/O.

use hydro_common::HydroError;
use thiserror::Error;

/// Result type for GeoTIFF operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

#[derive(Error, Debug)]
pub enum GeoTiffError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by the TIFF codec
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Missing or malformed georeferencing tags
    #[error("Missing georeferencing: {0}")]
    MissingGeoreference(String),

    /// Sample format that cannot be represented in the requested type
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Grid(#[from] HydroError),
}
