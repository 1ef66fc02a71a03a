//! `to-geotiff`: export one grid-file variable as a GeoTIFF.

use std::path::Path;

use anyhow::{Context, Result};
use geotiff::{write_geotiff, GeoTiffOptions};
use gridfile::GridFile;
use hydro_common::{CrsCode, GeoTransform, HydroError};
use hydro_core::non_empty_extent;
use tracing::info;

use crate::config::ToolsConfig;

pub fn run(
    h5file: &Path,
    geotiff: &Path,
    var: Option<&str>,
    shrink: bool,
    config: &ToolsConfig,
) -> Result<()> {
    let file = GridFile::open(h5file)
        .with_context(|| format!("Failed to open {}", h5file.display()))?;
    let name = file.select_variable(var)?;
    let mut coords = file.read_coords()?;
    let mut data = file.read_f32(&name)?;

    if data.shape() != coords.shape() {
        return Err(HydroError::shape_mismatch(name.as_str(), coords.shape(), data.shape()).into());
    }

    if shrink {
        let (rows, cols) = non_empty_extent(&data);
        info!(
            rows = ?rows,
            cols = ?cols,
            "Shrinking to non-empty extent"
        );
        coords = coords
            .slice(rows.clone(), cols.clone())
            .context("Shrunk extent is too small to georeference")?;
        data = data.crop(rows, cols);
    }

    super::check_coordinate_layout(&coords);
    coords.validate_uniform()?;

    let transform = GeoTransform::from_coords(&coords);
    let options = GeoTiffOptions {
        deflate: config.deflate,
        bigtiff: true,
        nodata: None,
        crs: CrsCode::WGS84,
    };
    write_geotiff(geotiff, &data, &transform, &options)
        .with_context(|| format!("Failed to write {}", geotiff.display()))?;

    info!(variable = %name, rows = data.rows(), cols = data.cols(), "Exported variable");
    Ok(())
}
