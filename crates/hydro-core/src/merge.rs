//! Merging modeled and surveyed drainage density.

use std::ops::Range;

use hydro_common::{Grid2D, HydroError, HydroResult};
use tracing::debug;

/// Surveyed density wins except where it has no usable value.
///
/// A cell falls back to `modeled` when the surveyed value is NaN, when it is
/// exactly zero outside the survey mask, or when the cell lies in the
/// `exclude` window (rows × cols). An empty `exclude` window excludes nothing.
pub fn merge_density(
    modeled: &Grid2D<f32>,
    surveyed: &Grid2D<f32>,
    survey_mask: &Grid2D<u8>,
    exclude: Option<(Range<usize>, Range<usize>)>,
) -> HydroResult<Grid2D<f32>> {
    let shape = modeled.shape();
    if surveyed.shape() != shape {
        return Err(HydroError::shape_mismatch("surveyed", shape, surveyed.shape()));
    }
    if survey_mask.shape() != shape {
        return Err(HydroError::shape_mismatch("survey_mask", shape, survey_mask.shape()));
    }

    let (rows, cols) = shape;
    let mut merged = surveyed.clone();
    let mut from_model = 0usize;

    for r in 0..rows {
        for c in 0..cols {
            let s = surveyed[(r, c)];
            let excluded = exclude
                .as_ref()
                .is_some_and(|(er, ec)| er.contains(&r) && ec.contains(&c));
            let unsurveyed_zero = survey_mask[(r, c)] == 0 && s == 0.0;
            if s.is_nan() || unsurveyed_zero || excluded {
                merged[(r, c)] = modeled[(r, c)];
                from_model += 1;
            }
        }
    }

    debug!(rows, cols, from_model, "Merged drainage density");
    Ok(merged)
}
