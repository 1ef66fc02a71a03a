//! `empty-raster`: zero-filled GeoTIFF on a grid file's coordinates.

use std::path::Path;

use anyhow::{Context, Result};
use geotiff::{write_geotiff, GeoTiffOptions};
use gridfile::GridFile;
use hydro_common::{CrsCode, GeoTransform, Grid2D};
use tracing::info;

use crate::config::ToolsConfig;

pub fn run(dest: &Path, grid: &Path, config: &ToolsConfig) -> Result<()> {
    let coords = GridFile::open(grid)
        .and_then(|f| f.read_coords())
        .with_context(|| format!("Failed to read coordinates from {}", grid.display()))?;
    super::check_coordinate_layout(&coords);

    let (rows, cols) = coords.shape();
    let data = Grid2D::filled(rows, cols, 0.0f32);
    let transform = GeoTransform::from_coords(&coords);
    let options = GeoTiffOptions {
        deflate: config.deflate,
        bigtiff: false,
        nodata: None,
        crs: CrsCode::WGS84,
    };
    write_geotiff(dest, &data, &transform, &options)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    info!(rows, cols, "Wrote empty raster");
    Ok(())
}
