//! Error types for hydro-grid operations.

use thiserror::Error;

/// Result type alias using HydroError.
pub type HydroResult<T> = Result<T, HydroError>;

/// Primary error type for grid model operations.
#[derive(Debug, Error)]
pub enum HydroError {
    // === Shape Errors ===
    #[error("Grid '{name}' has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Data length {len} does not match {rows}x{cols} grid")]
    DataLength { len: usize, rows: usize, cols: usize },

    // === Coordinate Errors ===
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Non-uniform {axis} spacing: step {step} deviates from {expected}")]
    NonUniformSpacing {
        axis: &'static str,
        step: f64,
        expected: f64,
    },
}

impl HydroError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        name: impl Into<String>,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            name: name.into(),
            expected,
            found,
        }
    }
}
