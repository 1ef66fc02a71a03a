//! Common types shared across the hydro-grid crates.

pub mod array;
pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod transform;

pub use array::Grid2D;
pub use bbox::BoundingBox;
pub use crs::{CrsCode, WGS84_WKT};
pub use error::{HydroError, HydroResult};
pub use grid::{GridCoords, OriginCorner};
pub use transform::GeoTransform;
