//! Regular latitude/longitude grid coordinates.

use std::ops::Range;

use crate::error::{HydroError, HydroResult};
use crate::BoundingBox;

/// Relative tolerance for the uniform-spacing check.
const SPACING_TOLERANCE: f64 = 1e-6;

/// Which corner of the grid row 0 / column 0 sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginCorner {
    /// Latitude descending: row 0 is the northern edge.
    NorthWest,
    /// Latitude ascending: row 0 is the southern edge.
    SouthWest,
}

/// The 1-D `lat` (H) and `lon` (W) coordinates of a regular grid.
///
/// Each sample is the center of a cell. The flow-direction engine never reads
/// these; they only fix the raster origin and resolution on export.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoords {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl GridCoords {
    /// Build from coordinate vectors, requiring at least two strictly
    /// monotonic samples on each axis.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> HydroResult<Self> {
        check_axis("lat", &lat)?;
        check_axis("lon", &lon)?;
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Shape as `(rows, cols)` = `(lat.len(), lon.len())`.
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Latitude step, always positive.
    pub fn dlat(&self) -> f64 {
        mean_step(&self.lat)
    }

    /// Longitude step, always positive.
    pub fn dlon(&self) -> f64 {
        mean_step(&self.lon)
    }

    pub fn lat_descending(&self) -> bool {
        self.lat[0] > self.lat[self.lat.len() - 1]
    }

    pub fn origin_corner(&self) -> OriginCorner {
        if self.lat_descending() {
            OriginCorner::NorthWest
        } else {
            OriginCorner::SouthWest
        }
    }

    /// Outer corner of the cell at row 0 / column 0, as `(lon, lat)`.
    pub fn origin(&self) -> (f64, f64) {
        let bbox = self.bbox();
        match self.origin_corner() {
            OriginCorner::NorthWest => (bbox.min_x, bbox.max_y),
            OriginCorner::SouthWest => (bbox.min_x, bbox.min_y),
        }
    }

    /// North-west corner used as a north-up raster origin:
    /// `(min(lon) - dlon/2, max(lat) + dlat/2)`.
    pub fn raster_origin(&self) -> (f64, f64) {
        let bbox = self.bbox();
        (bbox.min_x, bbox.max_y)
    }

    /// Cell-edge extent of the grid.
    pub fn bbox(&self) -> BoundingBox {
        let (lat_min, lat_max) = min_max(&self.lat);
        let (lon_min, lon_max) = min_max(&self.lon);
        let half_lat = 0.5 * self.dlat();
        let half_lon = 0.5 * self.dlon();
        BoundingBox::new(
            lon_min - half_lon,
            lat_min - half_lat,
            lon_max + half_lon,
            lat_max + half_lat,
        )
    }

    /// Fail unless every step on both axes matches the mean step.
    pub fn validate_uniform(&self) -> HydroResult<()> {
        check_uniform("lat", &self.lat)?;
        check_uniform("lon", &self.lon)
    }

    /// Coordinates restricted to `rows` × `cols`.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> HydroResult<Self> {
        if rows.end > self.lat.len() || cols.end > self.lon.len() {
            return Err(HydroError::InvalidCoordinates(format!(
                "slice {:?}x{:?} outside {:?}",
                rows,
                cols,
                self.shape()
            )));
        }
        Self::new(self.lat[rows].to_vec(), self.lon[cols].to_vec())
    }
}

fn check_axis(axis: &'static str, values: &[f64]) -> HydroResult<()> {
    if values.len() < 2 {
        return Err(HydroError::InvalidCoordinates(format!(
            "{axis} needs at least 2 samples, got {}",
            values.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(HydroError::InvalidCoordinates(format!(
            "{axis} contains non-finite values"
        )));
    }
    let ascending = values.windows(2).all(|w| w[1] > w[0]);
    let descending = values.windows(2).all(|w| w[1] < w[0]);
    if !ascending && !descending {
        return Err(HydroError::InvalidCoordinates(format!(
            "{axis} is not strictly monotonic"
        )));
    }
    Ok(())
}

fn check_uniform(axis: &'static str, values: &[f64]) -> HydroResult<()> {
    let expected = mean_step(values);
    for w in values.windows(2) {
        let step = (w[1] - w[0]).abs();
        if (step - expected).abs() > SPACING_TOLERANCE * expected.max(1.0) {
            return Err(HydroError::NonUniformSpacing {
                axis,
                step,
                expected,
            });
        }
    }
    Ok(())
}

fn mean_step(values: &[f64]) -> f64 {
    (values[values.len() - 1] - values[0]).abs() / (values.len() - 1) as f64
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> GridCoords {
        // 0.5° cells, latitude north to south
        GridCoords::new(vec![25.25, 24.75, 24.25], vec![120.25, 120.75, 121.25, 121.75]).unwrap()
    }

    #[test]
    fn test_shape_and_steps() {
        let c = coords();
        assert_eq!(c.shape(), (3, 4));
        assert!((c.dlat() - 0.5).abs() < 1e-12);
        assert!((c.dlon() - 0.5).abs() < 1e-12);
        assert!(c.validate_uniform().is_ok());
    }

    #[test]
    fn test_origin_descending_lat() {
        let c = coords();
        assert_eq!(c.origin_corner(), OriginCorner::NorthWest);
        let (x, y) = c.raster_origin();
        assert!((x - 120.0).abs() < 1e-12);
        assert!((y - 25.5).abs() < 1e-12);
        assert_eq!(c.origin(), c.raster_origin());
    }

    #[test]
    fn test_origin_ascending_lat() {
        let c = GridCoords::new(vec![10.0, 11.0], vec![0.0, 2.0]).unwrap();
        assert_eq!(c.origin_corner(), OriginCorner::SouthWest);
        assert_eq!(c.origin(), (-1.0, 9.5));
        assert_eq!(c.raster_origin(), (-1.0, 11.5));
    }

    #[test]
    fn test_rejects_short_or_non_monotonic_axes() {
        assert!(GridCoords::new(vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(GridCoords::new(vec![1.0, 2.0, 1.5], vec![0.0, 1.0]).is_err());
        assert!(GridCoords::new(vec![1.0, f64::NAN], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_non_uniform_spacing_detected() {
        let c = GridCoords::new(vec![0.0, 1.0, 3.0], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            c.validate_uniform(),
            Err(HydroError::NonUniformSpacing { axis: "lat", .. })
        ));
    }

    #[test]
    fn test_slice() {
        let c = coords().slice(1..3, 0..2).unwrap();
        assert_eq!(c.lat(), &[24.75, 24.25]);
        assert_eq!(c.lon(), &[120.25, 120.75]);
        assert!(coords().slice(0..4, 0..2).is_err());
    }
}
