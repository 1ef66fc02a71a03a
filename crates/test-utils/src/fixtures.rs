//! Common test fixtures for hydro-grid tests.

/// Bounding boxes as `(min_lon, min_lat, max_lon, max_lat)`.
pub mod bbox {
    /// Region the density merge always takes from the model.
    pub const MERGE_EXCLUDE: (f64, f64, f64, f64) = (118.835, 21.733, 122.267, 25.365);
}

/// Variable names used in grid files.
pub mod vars {
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const CRS: &str = "crs";
    pub const DENSITY: &str = "den";
    pub const DIRECTION: &str = "dir";
    pub const UPSTREAM_AREA: &str = "upa";
}

/// Hand-built scenarios for the flow-direction engine.
pub mod scenarios {
    use hydro_common::Grid2D;

    /// 3×3, every cell drains east, the eastern neighbor of the center has
    /// no density. Returns `(dir, upa, den)`.
    pub fn east_into_gap() -> (Grid2D<u8>, Grid2D<f32>, Grid2D<f32>) {
        let dir = Grid2D::filled(3, 3, 1u8);
        let upa = Grid2D::filled(3, 3, 4.0f32);
        let mut den = Grid2D::filled(3, 3, 1.2f32);
        den[(1, 2)] = f32::NAN;
        (dir, upa, den)
    }

    /// 5×5, row 0 and column 0 drain north (off grid), the rest drains
    /// south; density defined everywhere.
    pub fn border_pointing_off_grid() -> (Grid2D<u8>, Grid2D<f32>, Grid2D<f32>) {
        let mut dir = Grid2D::filled(5, 5, 4u8);
        for i in 0..5 {
            dir[(0, i)] = 64;
            dir[(i, 0)] = 64;
        }
        let upa = Grid2D::filled(5, 5, 1.0f32);
        let den = Grid2D::filled(5, 5, 0.7f32);
        (dir, upa, den)
    }
}
