//! Writing single-band f32 GeoTIFFs.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hydro_common::{CrsCode, GeoTransform, Grid2D};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::compression::{Compression, Deflate, Uncompressed};
use tiff::encoder::{TiffEncoder, TiffKind};
use tiff::tags::Tag;
use tracing::info;

use crate::error::GeoTiffResult;
use crate::geokeys;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Deflate-compress the image strips
    pub deflate: bool,
    /// Use the 64-bit BigTIFF container
    pub bigtiff: bool,
    /// Value written to the GDAL nodata tag
    pub nodata: Option<f64>,
    pub crs: CrsCode,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self {
            deflate: true,
            bigtiff: true,
            nodata: None,
            crs: CrsCode::WGS84,
        }
    }
}

/// Write `grid` as a single-band f32 GeoTIFF georeferenced by `transform`.
pub fn write_geotiff(
    path: impl AsRef<Path>,
    grid: &Grid2D<f32>,
    transform: &GeoTransform,
    options: &GeoTiffOptions,
) -> GeoTiffResult<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);

    match (options.bigtiff, options.deflate) {
        (true, true) => encode(&mut TiffEncoder::new_big(writer)?, grid, transform, options, Deflate::default())?,
        (true, false) => encode(&mut TiffEncoder::new_big(writer)?, grid, transform, options, Uncompressed)?,
        (false, true) => encode(&mut TiffEncoder::new(writer)?, grid, transform, options, Deflate::default())?,
        (false, false) => encode(&mut TiffEncoder::new(writer)?, grid, transform, options, Uncompressed)?,
    }

    info!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        crs = %options.crs,
        deflate = options.deflate,
        "Wrote GeoTIFF"
    );
    Ok(())
}

fn encode<W, K, D>(
    encoder: &mut TiffEncoder<W, K>,
    grid: &Grid2D<f32>,
    transform: &GeoTransform,
    options: &GeoTiffOptions,
    compression: D,
) -> GeoTiffResult<()>
where
    W: Write + Seek,
    K: TiffKind,
    D: Compression,
{
    let (rows, cols) = grid.shape();
    let mut image =
        encoder.new_image_with_compression::<Gray32Float, D>(cols as u32, rows as u32, compression)?;

    let scale = [transform.pixel_width, transform.pixel_height.abs(), 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, &scale[..])?;

    let tiepoint = [0.0, 0.0, 0.0, transform.origin_x, transform.origin_y, 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;

    let directory = geokeys::directory_for(options.crs);
    image
        .encoder()
        .write_tag(Tag::GeoKeyDirectoryTag, directory.as_slice())?;

    if let Some(nodata) = options.nodata {
        let text = format_nodata(nodata);
        image
            .encoder()
            .write_tag(Tag::GdalNodata, text.as_str())?;
    }

    image.write_data(grid.data())?;
    Ok(())
}

/// GDAL's textual nodata representation.
pub(crate) fn format_nodata(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        value.to_string()
    }
}
