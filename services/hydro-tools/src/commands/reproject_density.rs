//! `reproject-density`: resample a density raster onto another raster's grid.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use geotiff::{read_geotiff_f32, write_geotiff, GeoTiffOptions};
use hydro_core::{resample, InterpolationMethod};
use tracing::info;

use crate::config::ToolsConfig;

pub fn run(src: &Path, dest_grid: &Path, dest: &Path, config: &ToolsConfig) -> Result<()> {
    let target = read_geotiff_f32(dest_grid)
        .with_context(|| format!("Failed to read destination grid {}", dest_grid.display()))?;
    let source = read_geotiff_f32(src)
        .with_context(|| format!("Failed to read source raster {}", src.display()))?;

    let crs = target
        .crs
        .ok_or_else(|| anyhow!("Destination grid {} declares no EPSG code", dest_grid.display()))?;
    let source_crs = source
        .crs
        .ok_or_else(|| anyhow!("Source raster {} declares no EPSG code", src.display()))?;
    if source_crs.epsg() != crs.epsg() {
        bail!(
            "Source CRS {source_crs} differs from destination CRS {crs}; only same-CRS resampling is supported"
        );
    }

    let nodata = config.source_nodata;
    let src_data = source.grid.map(|v| if v < 0.0 { nodata } else { v });

    let mut output = resample(
        &src_data,
        &source.transform,
        Some(nodata),
        &target.transform,
        target.shape(),
        InterpolationMethod::Bilinear,
    );
    for v in output.data_mut() {
        *v *= config.density_scale;
    }

    let options = GeoTiffOptions {
        deflate: config.deflate,
        bigtiff: false,
        nodata: Some(f64::NAN),
        crs,
    };
    write_geotiff(dest, &output, &target.transform, &options)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    info!(
        rows = output.rows(),
        cols = output.cols(),
        crs = %crs,
        scale = config.density_scale,
        "Resampled drainage density"
    );
    Ok(())
}
