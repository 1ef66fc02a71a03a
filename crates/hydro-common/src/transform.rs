//! Affine origin + resolution transform for north-up rasters.

use serde::{Deserialize, Serialize};

use crate::GridCoords;

/// Maps pixel `(col, row)` edges to world `(x, y)`:
/// `x = origin_x + col * pixel_width`, `y = origin_y + row * pixel_height`.
///
/// `pixel_height` is negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// North-up transform with pixels centered on the grid's coordinate samples.
    pub fn from_coords(coords: &GridCoords) -> Self {
        let (x, y) = coords.raster_origin();
        Self::new(x, y, coords.dlon(), -coords.dlat())
    }

    /// World coordinates of a pixel center.
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y + (row as f64 + 0.5) * self.pixel_height,
        )
    }

    /// Fractional pixel-center indices `(col, row)` of a world point.
    ///
    /// Integer results land exactly on pixel centers.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.origin_x) / self.pixel_width - 0.5,
            (y - self.origin_y) / self.pixel_height - 0.5,
        )
    }
}
