//! Synthetic grid generators for hydrological test data.
//!
//! All generators are deterministic: the same arguments always produce the
//! same grid.

use hydro_common::{Grid2D, GridCoords};

/// Single-bit D8 codes plus `0`, in code order.
pub const D8_CODES: [u8; 9] = [0, 1, 2, 4, 8, 16, 32, 64, 128];

/// Creates a grid with predictable values: `col * 1000 + row`.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(5, 10);
/// assert_eq!(grid.shape(), (5, 10));
/// assert_eq!(grid[(0, 1)], 1000.0);
/// assert_eq!(grid[(1, 0)], 1.0);
/// ```
pub fn create_test_grid(rows: usize, cols: usize) -> Grid2D<f32> {
    let data = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col * 1000 + row) as f32))
        .collect();
    Grid2D::from_vec(data, rows, cols).expect("generator produced rows * cols values")
}

/// Creates a pseudo-random D8 direction grid (codes from [`D8_CODES`]).
pub fn create_d8_grid(rows: usize, cols: usize, seed: u32) -> Grid2D<u8> {
    let mut grid = Grid2D::filled(rows, cols, 0u8);
    for row in 0..rows {
        for col in 0..cols {
            let hash = simple_hash(col as u32, row as u32, seed);
            grid[(row, col)] = D8_CODES[(hash % D8_CODES.len() as u32) as usize];
        }
    }
    grid
}

/// Creates a density grid in `0.0..5.0` (m m-2) with roughly
/// `gap_percent` % of cells set to NaN.
pub fn create_density_grid(rows: usize, cols: usize, seed: u32, gap_percent: u32) -> Grid2D<f32> {
    let mut grid = Grid2D::filled(rows, cols, 0.0f32);
    for row in 0..rows {
        for col in 0..cols {
            let hash = simple_hash(col as u32, row as u32, seed.wrapping_add(7919));
            grid[(row, col)] = if hash % 100 < gap_percent {
                f32::NAN
            } else {
                (hash % 5000) as f32 / 1000.0
            };
        }
    }
    grid
}

/// Creates an upstream-area grid increasing downstream (row-wise).
pub fn create_upstream_area_grid(rows: usize, cols: usize) -> Grid2D<f32> {
    let data = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| ((row + 1) * (col + 1)) as f32 * 0.25))
        .collect();
    Grid2D::from_vec(data, rows, cols).expect("generator produced rows * cols values")
}

/// Creates a grid with NaN at the given `(row, col)` positions and `value`
/// elsewhere. Out-of-range positions are ignored.
pub fn create_grid_with_nans(
    rows: usize,
    cols: usize,
    value: f32,
    nan_positions: &[(usize, usize)],
) -> Grid2D<f32> {
    let mut grid = Grid2D::filled(rows, cols, value);
    for &(row, col) in nan_positions {
        if row < rows && col < cols {
            grid[(row, col)] = f32::NAN;
        }
    }
    grid
}

/// Creates north-to-south, west-to-east cell-center coordinates.
pub fn create_coords(
    rows: usize,
    cols: usize,
    north: f64,
    west: f64,
    step: f64,
) -> GridCoords {
    let lat = (0..rows).map(|i| north - (i as f64 + 0.5) * step).collect();
    let lon = (0..cols).map(|j| west + (j as f64 + 0.5) * step).collect();
    GridCoords::new(lat, lon).unwrap_or_else(|e| panic!("invalid test coordinates: {e}"))
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_d8_grid_only_valid_codes() {
        let grid = create_d8_grid(20, 30, 1);
        assert_eq!(grid.shape(), (20, 30));
        assert!(grid.data().iter().all(|c| D8_CODES.contains(c)));
        assert!(grid.data().iter().any(|&c| c != 0));
    }

    #[test]
    fn test_density_grid_deterministic_with_gaps() {
        let a = create_density_grid(50, 50, 42, 20);
        let b = create_density_grid(50, 50, 42, 20);
        let nan_a: Vec<bool> = a.data().iter().map(|v| v.is_nan()).collect();
        let nan_b: Vec<bool> = b.data().iter().map(|v| v.is_nan()).collect();
        assert_eq!(nan_a, nan_b);
        let gaps = nan_a.iter().filter(|&&n| n).count();
        assert!(gaps > 0 && gaps < 2500);
    }

    #[test]
    fn test_density_grid_without_gaps() {
        let grid = create_density_grid(10, 10, 3, 0);
        assert!(grid.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_create_grid_with_nans() {
        let grid = create_grid_with_nans(10, 10, 1.0, &[(5, 5), (0, 0), (99, 0)]);
        assert!(grid[(0, 0)].is_nan());
        assert!(grid[(5, 5)].is_nan());
        assert_eq!(grid[(0, 1)], 1.0);
    }

    #[test]
    fn test_create_coords() {
        let coords = create_coords(4, 6, 25.0, 120.0, 0.5);
        assert_eq!(coords.shape(), (4, 6));
        assert!((coords.lat()[0] - 24.75).abs() < 1e-12);
        assert!((coords.lon()[0] - 120.25).abs() < 1e-12);
        assert!(coords.lat_descending());
    }
}
