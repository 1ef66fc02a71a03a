//! Grid-file access for lat/lon rasters stored as netCDF-4 / HDF5.
//!
//! Files hold one-dimensional `lat` and `lon` coordinate variables, an
//! optional scalar `crs` variable, and one or more 2-D data variables indexed
//! `[lat, lon]`.
//!
//! # Example
//!
//! ```ignore
//! use gridfile::GridFile;
//!
//! let file = GridFile::open("density.nc")?;
//! let name = file.select_variable(None)?;
//! let coords = file.read_coords()?;
//! let den = file.read_f32(&name)?;
//! ```

pub mod error;
pub mod hdf5;
pub mod reader;
pub mod writer;

pub use error::{GridFileError, GridFileResult};
pub use hdf5::silence_hdf5_errors;
pub use reader::{GridFile, COORDINATE_VARIABLES};
pub use writer::{update_flow_grids, write_density, WriteOptions};
