//! Error types for grid-file operations.

use hydro_common::HydroError;
use thiserror::Error;

/// Result type for grid-file operations.
pub type GridFileResult<T> = Result<T, GridFileError>;

/// Error types for grid-file reading and writing.
#[derive(Error, Debug)]
pub enum GridFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by the netCDF/HDF5 library
    #[error("netCDF error: {0}")]
    Netcdf(String),

    /// A required variable is absent
    #[error("Variable not found: {0}")]
    MissingVariable(String),

    /// Variable auto-selection did not find exactly one candidate
    #[error("Expected exactly one data variable, found {}: {candidates:?}", .candidates.len())]
    AmbiguousVariable { candidates: Vec<String> },

    /// Invalid data layout
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Coordinates or grid shapes rejected by the grid model
    #[error(transparent)]
    Grid(#[from] HydroError),
}

impl From<netcdf::Error> for GridFileError {
    fn from(err: netcdf::Error) -> Self {
        GridFileError::Netcdf(err.to_string())
    }
}
