//! Reading coordinates and 2-D variables from grid files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use hydro_common::{Grid2D, GridCoords};
use tracing::debug;

use crate::error::{GridFileError, GridFileResult};
use crate::hdf5::silence_hdf5_errors;

/// Variable names that are never data candidates.
pub const COORDINATE_VARIABLES: [&str; 3] = ["lat", "lon", "crs"];

/// An open grid file.
pub struct GridFile {
    path: PathBuf,
    file: netcdf::File,
}

impl GridFile {
    /// Open a grid file read-only.
    pub fn open(path: impl AsRef<Path>) -> GridFileResult<Self> {
        silence_hdf5_errors();
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(GridFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        let file = netcdf::open(&path)?;
        debug!(path = %path.display(), "Opened grid file");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All variable names in the file's root group, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self.file.variables().map(|v| v.name()).collect();
        names.into_iter().collect()
    }

    /// Resolve the data variable to read.
    ///
    /// With a selector, the named variable must exist. Without one, the file
    /// must hold exactly one variable besides `lat`, `lon` and `crs`.
    pub fn select_variable(&self, selector: Option<&str>) -> GridFileResult<String> {
        if let Some(name) = selector {
            if self.file.variable(name).is_none() {
                return Err(GridFileError::MissingVariable(name.to_string()));
            }
            return Ok(name.to_string());
        }

        let candidates: Vec<String> = self
            .variable_names()
            .into_iter()
            .filter(|n| !COORDINATE_VARIABLES.contains(&n.as_str()))
            .collect();
        match candidates.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(GridFileError::AmbiguousVariable { candidates }),
        }
    }

    /// Read the `lat` / `lon` coordinate vectors.
    pub fn read_coords(&self) -> GridFileResult<GridCoords> {
        let lat = self.read_1d("lat")?;
        let lon = self.read_1d("lon")?;
        Ok(GridCoords::new(lat, lon)?)
    }

    /// Shape `(rows, cols)` of a 2-D variable.
    pub fn shape_of(&self, name: &str) -> GridFileResult<(usize, usize)> {
        let var = self.variable(name)?;
        match var.dimensions() {
            [rows, cols] => Ok((rows.len(), cols.len())),
            dims => Err(GridFileError::InvalidFormat(format!(
                "{name} has {} dimensions, expected 2",
                dims.len()
            ))),
        }
    }

    /// Read a 2-D variable as f32.
    pub fn read_f32(&self, name: &str) -> GridFileResult<Grid2D<f32>> {
        let (rows, cols) = self.shape_of(name)?;
        let values: Vec<f32> = self.variable(name)?.get_values(..)?;
        debug!(variable = name, rows, cols, "Read f32 grid variable");
        Ok(Grid2D::from_vec(values, rows, cols)?)
    }

    /// Read a 2-D variable as f64; f32 and f64 variables read losslessly.
    pub fn read_f64(&self, name: &str) -> GridFileResult<Grid2D<f64>> {
        let (rows, cols) = self.shape_of(name)?;
        let values: Vec<f64> = self.variable(name)?.get_values(..)?;
        debug!(variable = name, rows, cols, "Read f64 grid variable");
        Ok(Grid2D::from_vec(values, rows, cols)?)
    }

    /// Read a 2-D variable as u8.
    pub fn read_u8(&self, name: &str) -> GridFileResult<Grid2D<u8>> {
        let (rows, cols) = self.shape_of(name)?;
        let values: Vec<u8> = self.variable(name)?.get_values(..)?;
        debug!(variable = name, rows, cols, "Read u8 grid variable");
        Ok(Grid2D::from_vec(values, rows, cols)?)
    }

    fn read_1d(&self, name: &str) -> GridFileResult<Vec<f64>> {
        let var = self.variable(name)?;
        if var.dimensions().len() != 1 {
            return Err(GridFileError::InvalidFormat(format!(
                "{name} has {} dimensions, expected 1",
                var.dimensions().len()
            )));
        }
        let values: Vec<f64> = var.get_values(..)?;
        Ok(values)
    }

    fn variable(&self, name: &str) -> GridFileResult<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| GridFileError::MissingVariable(name.to_string()))
    }
}
