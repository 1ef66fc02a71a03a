//! Writing density grids and updating flow-direction grids.

use std::path::Path;

use hydro_common::{Grid2D, GridCoords, HydroError, WGS84_WKT};
use tracing::{debug, info};

use crate::error::{GridFileError, GridFileResult};
use crate::hdf5::silence_hdf5_errors;

/// Options controlling how density variables are stored.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Deflate level (0-9); 0 disables compression.
    pub deflate_level: i32,
    /// Element count above which the data variable is chunked.
    pub chunk_threshold: usize,
    /// Chunk edge length for large variables.
    pub chunk_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            deflate_level: 4,
            chunk_threshold: 100_000_000,
            chunk_size: 4096,
        }
    }
}

/// Write `lat`, `lon`, `crs` and a `den` variable to a new file.
///
/// An existing file at `path` is replaced.
pub fn write_density(
    path: impl AsRef<Path>,
    coords: &GridCoords,
    den: &Grid2D<f32>,
    options: &WriteOptions,
) -> GridFileResult<()> {
    silence_hdf5_errors();
    let path = path.as_ref();
    let (rows, cols) = coords.shape();
    if den.shape() != (rows, cols) {
        return Err(HydroError::shape_mismatch("den", (rows, cols), den.shape()).into());
    }

    let mut file = netcdf::create(path)?;
    file.add_dimension("lat", rows)?;
    file.add_dimension("lon", cols)?;

    {
        let mut lat = file.add_variable::<f64>("lat", &["lat"])?;
        compress(&mut lat, options.deflate_level)?;
        lat.put_values(coords.lat(), ..)?;
        lat.put_attribute("units", "degrees_north")?;
        lat.put_attribute("standard_name", "latitude")?;
    }
    {
        let mut lon = file.add_variable::<f64>("lon", &["lon"])?;
        compress(&mut lon, options.deflate_level)?;
        lon.put_values(coords.lon(), ..)?;
        lon.put_attribute("units", "degrees_east")?;
        lon.put_attribute("standard_name", "longitude")?;
    }
    {
        let mut crs = file.add_variable::<u8>("crs", &[])?;
        crs.put_attribute("grid_mapping_name", "latitude_longitude")?;
        crs.put_attribute("crs_wkt", WGS84_WKT)?;
    }
    {
        let mut var = file.add_variable::<f32>("den", &["lat", "lon"])?;
        compress(&mut var, options.deflate_level)?;
        if den.len() > options.chunk_threshold {
            let chunk = options.chunk_size.max(1);
            var.set_chunking(&[chunk.min(rows), chunk.min(cols)])?;
        }
        var.set_fill_value(f32::NAN)?;
        var.put_values(den.data(), ..)?;
        var.put_attribute("long_name", "drainage density")?;
        var.put_attribute("units", "m m-2")?;
        var.put_attribute("grid_mapping", "crs")?;
    }

    info!(path = %path.display(), rows, cols, "Wrote density grid file");
    Ok(())
}

/// Overwrite the `dir` and `upa` variables of an existing file in place.
///
/// `upa` is converted to the variable's stored type on write, so values read
/// with [`GridFile::read_f64`](crate::GridFile::read_f64) come back unchanged.
pub fn update_flow_grids(
    path: impl AsRef<Path>,
    dir: &Grid2D<u8>,
    upa: &Grid2D<f64>,
) -> GridFileResult<()> {
    silence_hdf5_errors();
    let path = path.as_ref();
    let mut file = netcdf::append(path)?;

    if dir.shape() != upa.shape() {
        return Err(HydroError::shape_mismatch("upa", dir.shape(), upa.shape()).into());
    }
    flow_variable(&mut file, "dir", dir.shape())?.put_values(dir.data(), ..)?;
    flow_variable(&mut file, "upa", upa.shape())?.put_values(upa.data(), ..)?;

    info!(path = %path.display(), rows = dir.rows(), cols = dir.cols(), "Updated flow grids");
    Ok(())
}

fn flow_variable<'f>(
    file: &'f mut netcdf::FileMut,
    name: &str,
    shape: (usize, usize),
) -> GridFileResult<netcdf::VariableMut<'f>> {
    let var = file
        .variable_mut(name)
        .ok_or_else(|| GridFileError::MissingVariable(name.to_string()))?;
    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if dims != [shape.0, shape.1] {
        return Err(GridFileError::InvalidFormat(format!(
            "{name} has shape {dims:?} in file, grid is {shape:?}"
        )));
    }
    debug!(variable = name, "Writing grid variable");
    Ok(var)
}

fn compress(var: &mut netcdf::VariableMut<'_>, level: i32) -> GridFileResult<()> {
    if level > 0 {
        var.set_compression(level, true)?;
    }
    Ok(())
}
