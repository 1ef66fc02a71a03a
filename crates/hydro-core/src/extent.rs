//! Index ranges for cropping grids.

use std::ops::Range;

use hydro_common::Grid2D;

/// Rows and columns spanning every finite value in `grid`.
///
/// A grid with no finite value keeps its full extent.
pub fn non_empty_extent(grid: &Grid2D<f32>) -> (Range<usize>, Range<usize>) {
    let (rows, cols) = grid.shape();
    let row_has_data = |r: usize| grid.row(r).iter().any(|v| v.is_finite());
    let col_has_data = |c: usize| (0..rows).any(|r| grid[(r, c)].is_finite());

    let row_start = (0..rows).find(|&r| row_has_data(r)).unwrap_or(0);
    let row_end = (0..rows).rev().find(|&r| row_has_data(r)).map_or(rows, |r| r + 1);
    let col_start = (0..cols).find(|&c| col_has_data(c)).unwrap_or(0);
    let col_end = (0..cols).rev().find(|&c| col_has_data(c)).map_or(cols, |c| c + 1);

    (row_start..row_end, col_start..col_end)
}

/// Indices of `coords` inside the inclusive `limit`, widened by one cell on
/// each side and clamped to the axis.
///
/// `None` as the limit selects the whole axis. Returns `None` when no
/// coordinate falls inside the limit.
pub fn coordinate_slice(coords: &[f64], limit: Option<(f64, f64)>) -> Option<Range<usize>> {
    let Some((lo, hi)) = limit else {
        return Some(0..coords.len());
    };

    let mut inside = coords
        .iter()
        .enumerate()
        .filter(|(_, &v)| lo <= v && v <= hi)
        .map(|(i, _)| i);
    let first = inside.next()?;
    let last = inside.last().unwrap_or(first);

    Some(first.saturating_sub(1)..(last + 2).min(coords.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f32 = f32::NAN;

    #[test]
    fn test_non_empty_extent() {
        #[rustfmt::skip]
        let grid = Grid2D::from_vec(vec![
            NAN, NAN, NAN, NAN,
            NAN, 1.0, NAN, NAN,
            NAN, NAN, 2.0, NAN,
            NAN, NAN, NAN, NAN,
        ], 4, 4).unwrap();
        assert_eq!(non_empty_extent(&grid), (1..3, 1..3));
    }

    #[test]
    fn test_non_empty_extent_all_missing_keeps_full_grid() {
        let grid = Grid2D::filled(3, 5, NAN);
        assert_eq!(non_empty_extent(&grid), (0..3, 0..5));
    }

    #[test]
    fn test_infinite_values_do_not_count() {
        let mut grid = Grid2D::filled(3, 3, NAN);
        grid[(0, 0)] = f32::INFINITY;
        grid[(2, 2)] = 0.0;
        assert_eq!(non_empty_extent(&grid), (2..3, 2..3));
    }

    #[test]
    fn test_coordinate_slice_widens_by_one() {
        let lon: Vec<f64> = (0..10).map(|i| 118.0 + 0.5 * i as f64).collect();
        // 119.0..=120.0 -> indices 2..=4, widened to 1..6
        assert_eq!(coordinate_slice(&lon, Some((119.0, 120.0))), Some(1..6));
    }

    #[test]
    fn test_coordinate_slice_clamps_at_ends() {
        let lat = [25.0, 24.0, 23.0, 22.0];
        assert_eq!(coordinate_slice(&lat, Some((24.5, 30.0))), Some(0..2));
        assert_eq!(coordinate_slice(&lat, Some((21.0, 22.5))), Some(2..4));
        assert_eq!(coordinate_slice(&lat, None), Some(0..4));
        assert_eq!(coordinate_slice(&lat, Some((30.0, 40.0))), None);
    }
}
