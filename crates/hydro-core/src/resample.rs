//! Resampling a raster onto another grid in the same CRS.
//!
//! Destination pixel centers are mapped through the source transform and
//! sampled with the chosen kernel. Points outside the source, or whose kernel
//! touches a nodata pixel, become NaN.

use hydro_common::{GeoTransform, Grid2D};
use rayon::prelude::*;
use tracing::debug;

/// Interpolation kernel for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
    Nearest,
    #[default]
    Bilinear,
}

/// Nearest neighbor interpolation at fractional pixel-center indices.
pub fn nearest_interpolate(data: &Grid2D<f32>, col: f64, row: f64) -> f32 {
    let c = col.round();
    let r = row.round();
    if c < 0.0 || r < 0.0 {
        return f32::NAN;
    }
    data.get(r as usize, c as usize).unwrap_or(f32::NAN)
}

/// Bilinear interpolation at fractional pixel-center indices.
///
/// Returns NaN if any of the four surrounding values is NaN.
pub fn bilinear_interpolate(data: &Grid2D<f32>, col: f64, row: f64) -> f32 {
    let (rows, cols) = data.shape();
    if col < 0.0 || row < 0.0 || col > (cols - 1) as f64 || row > (rows - 1) as f64 {
        return f32::NAN;
    }

    let x0 = col.floor() as usize;
    let y0 = row.floor() as usize;
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);

    let xf = (col - x0 as f64) as f32;
    let yf = (row - y0 as f64) as f32;

    let v00 = data[(y0, x0)];
    let v10 = data[(y0, x1)];
    let v01 = data[(y1, x0)];
    let v11 = data[(y1, x1)];

    if v00.is_nan() || v10.is_nan() || v01.is_nan() || v11.is_nan() {
        return f32::NAN;
    }

    let top = v00 * (1.0 - xf) + v10 * xf;
    let bottom = v01 * (1.0 - xf) + v11 * xf;
    top * (1.0 - yf) + bottom * yf
}

/// Resample `src` onto a destination grid of `dst_shape` (rows, cols).
///
/// Source pixels equal to `src_nodata` are treated as missing.
pub fn resample(
    src: &Grid2D<f32>,
    src_transform: &GeoTransform,
    src_nodata: Option<f32>,
    dst_transform: &GeoTransform,
    dst_shape: (usize, usize),
    method: InterpolationMethod,
) -> Grid2D<f32> {
    let (dst_rows, dst_cols) = dst_shape;
    let mut output = Grid2D::filled(dst_rows, dst_cols, f32::NAN);
    if src.is_empty() || dst_cols == 0 {
        return output;
    }

    let masked;
    let src = match src_nodata {
        Some(nodata) if !nodata.is_nan() => {
            masked = src.map(|v| if v == nodata { f32::NAN } else { v });
            &masked
        }
        _ => src,
    };

    output
        .data_mut()
        .par_chunks_mut(dst_cols)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, out) in out_row.iter_mut().enumerate() {
                let (x, y) = dst_transform.pixel_center(row, col);
                let (sc, sr) = src_transform.world_to_pixel(x, y);
                *out = match method {
                    InterpolationMethod::Nearest => nearest_interpolate(src, sc, sr),
                    InterpolationMethod::Bilinear => bilinear_interpolate(src, sc, sr),
                };
            }
        });

    debug!(
        src_rows = src.rows(),
        src_cols = src.cols(),
        dst_rows,
        dst_cols,
        method = ?method,
        "Resampled raster"
    );
    output
}
