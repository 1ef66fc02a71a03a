//! Outlet consistency between a D8 direction grid and a density grid.
//!
//! Every cell whose drainage density is undefined loses its outflow and its
//! upstream area. Every interior cell with defined density that drains into a
//! neighbor with undefined density becomes an outlet (code 0).
//!
//! The one-cell border ring is never checked against its neighbors: a border
//! cell is only cleared when its own density is undefined.
//!
//! Passes, in order:
//! 1. `dir = 0` wherever `den` is undefined (whole grid).
//! 2. interior cells: `dir = 0` when the neighbor named by `dir` has
//!    undefined `den`. Decisions read only `den`, which is never written.
//! 3. `upa = NaN` wherever `den` is undefined (whole grid).

use hydro_common::{Grid2D, HydroError, HydroResult};
use num_traits::Float;
use rayon::prelude::*;
use tracing::debug;

use crate::d8::{is_valid_code, D8Direction, NO_FLOW};

/// Undefined density: NaN or infinite.
#[inline]
pub fn is_undefined(value: f32) -> bool {
    !value.is_finite()
}

/// Counts of cells changed by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Non-zero codes cleared because the cell's own density is undefined.
    pub gated: usize,
    /// Interior codes cleared because their target neighbor is undefined.
    pub outlets: usize,
    /// Upstream-area values newly set to NaN.
    pub area_masked: usize,
}

impl ReconcileStats {
    pub fn total_cleared(&self) -> usize {
        self.gated + self.outlets
    }
}

/// Check that `dir` and `upa` share the shape of `den`.
///
/// Callers loading grids from files use this to report a mismatch as an
/// error before invoking [`reconcile`], which panics on it.
pub fn check_alignment<A: Copy>(
    dir: &Grid2D<u8>,
    upa: &Grid2D<A>,
    den: &Grid2D<f32>,
) -> HydroResult<()> {
    let expected = den.shape();
    if dir.shape() != expected {
        return Err(HydroError::shape_mismatch("dir", expected, dir.shape()));
    }
    if upa.shape() != expected {
        return Err(HydroError::shape_mismatch("upa", expected, upa.shape()));
    }
    Ok(())
}

/// Reconcile `dir` and `upa` against `den` in place.
///
/// `upa` keeps its element type, so cells that are not masked are left
/// bit-for-bit unchanged.
///
/// # Panics
///
/// Panics if the three grids differ in shape or if `dir` holds a value other
/// than `0` or a single-bit D8 code.
pub fn reconcile<A: Float>(
    dir: &mut Grid2D<u8>,
    upa: &mut Grid2D<A>,
    den: &Grid2D<f32>,
) -> ReconcileStats {
    assert_preconditions(dir, upa, den);
    let (rows, cols) = den.shape();

    // Pass 1
    let mut gated = 0;
    for (code, &d) in dir.data_mut().iter_mut().zip(den.data()) {
        if is_undefined(d) && *code != NO_FLOW {
            *code = NO_FLOW;
            gated += 1;
        }
    }

    // Pass 2
    let mut outlets = 0;
    for row in 1..rows.saturating_sub(1) {
        let dir_row = &mut dir.data_mut()[row * cols..(row + 1) * cols];
        outlets += mask_row_outlets(dir_row, row, den);
    }

    // Pass 3
    let area_masked = mask_area(upa.data_mut(), den.data());

    let stats = ReconcileStats {
        gated,
        outlets,
        area_masked,
    };
    debug!(
        rows,
        cols,
        gated = stats.gated,
        outlets = stats.outlets,
        area_masked = stats.area_masked,
        "Reconciled flow direction with density coverage"
    );
    stats
}

/// Row-sharded variant of [`reconcile`] with identical results.
///
/// Pass 1 completes over the whole grid before any Pass 2 row starts; Pass 3
/// runs alongside Pass 2 since it touches only `upa`.
pub fn reconcile_parallel<A: Float + Send>(
    dir: &mut Grid2D<u8>,
    upa: &mut Grid2D<A>,
    den: &Grid2D<f32>,
) -> ReconcileStats {
    assert_preconditions(dir, upa, den);
    let (rows, cols) = den.shape();
    if cols == 0 {
        return ReconcileStats::default();
    }

    let gated = dir
        .data_mut()
        .par_chunks_mut(cols)
        .zip(den.data().par_chunks(cols))
        .map(|(dir_row, den_row)| {
            let mut n = 0;
            for (code, &d) in dir_row.iter_mut().zip(den_row) {
                if is_undefined(d) && *code != NO_FLOW {
                    *code = NO_FLOW;
                    n += 1;
                }
            }
            n
        })
        .sum::<usize>();

    let (outlets, area_masked) = rayon::join(
        || {
            dir.data_mut()
                .par_chunks_mut(cols)
                .enumerate()
                .filter(|(row, _)| *row >= 1 && *row + 1 < rows)
                .map(|(row, dir_row)| mask_row_outlets(dir_row, row, den))
                .sum::<usize>()
        },
        || {
            upa.data_mut()
                .par_chunks_mut(cols)
                .zip(den.data().par_chunks(cols))
                .map(|(upa_row, den_row)| mask_area(upa_row, den_row))
                .sum::<usize>()
        },
    );

    let stats = ReconcileStats {
        gated,
        outlets,
        area_masked,
    };
    debug!(
        rows,
        cols,
        gated = stats.gated,
        outlets = stats.outlets,
        area_masked = stats.area_masked,
        "Reconciled flow direction with density coverage (parallel)"
    );
    stats
}

/// Clear codes in one interior row whose target neighbor has undefined density.
fn mask_row_outlets(dir_row: &mut [u8], row: usize, den: &Grid2D<f32>) -> usize {
    let cols = den.cols();
    let mut cleared = 0;
    for col in 1..cols.saturating_sub(1) {
        let code = dir_row[col];
        if code == NO_FLOW || is_undefined(den[(row, col)]) {
            continue;
        }
        let Some(direction) = D8Direction::from_code(code) else {
            continue;
        };
        if is_undefined(den[direction.neighbor(row, col)]) {
            dir_row[col] = NO_FLOW;
            cleared += 1;
        }
    }
    cleared
}

fn mask_area<A: Float>(upa: &mut [A], den: &[f32]) -> usize {
    let mut masked = 0;
    for (a, &d) in upa.iter_mut().zip(den) {
        if is_undefined(d) {
            if !a.is_nan() {
                masked += 1;
            }
            *a = A::nan();
        }
    }
    masked
}

fn assert_preconditions<A: Copy>(dir: &Grid2D<u8>, upa: &Grid2D<A>, den: &Grid2D<f32>) {
    if let Err(e) = check_alignment(dir, upa, den) {
        panic!("reconcile precondition violated: {e}");
    }
    if let Some(pos) = dir.data().iter().position(|&c| !is_valid_code(c)) {
        let cols = dir.cols();
        panic!(
            "reconcile precondition violated: invalid D8 code {} at ({}, {})",
            dir.data()[pos],
            pos / cols,
            pos % cols
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f32 = f32::NAN;

    fn grid<T: Copy>(rows: usize, cols: usize, data: Vec<T>) -> Grid2D<T> {
        Grid2D::from_vec(data, rows, cols).unwrap()
    }

    #[test]
    fn test_interior_cell_pointing_at_undefined_becomes_outlet() {
        let mut dir = Grid2D::filled(3, 3, 1u8);
        let mut upa = Grid2D::filled(3, 3, 10.0f32);
        let den = grid(3, 3, vec![1.0, 1.0, 1.0, 1.0, 1.0, NAN, 1.0, 1.0, 1.0]);

        let stats = reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir[(1, 1)], 0);
        assert_eq!(dir[(1, 2)], 0);
        assert!(upa[(1, 2)].is_nan());
        assert_eq!(upa[(1, 1)], 10.0);
        assert_eq!(
            stats,
            ReconcileStats {
                gated: 1,
                outlets: 1,
                area_masked: 1
            }
        );
    }

    #[test]
    fn test_f64_area_untouched_outside_mask() {
        let mut dir = Grid2D::filled(3, 3, 4u8);
        let mut upa = Grid2D::filled(3, 3, 123_456_789.123_f64);
        let mut den = Grid2D::filled(3, 3, 1.0f32);
        den[(0, 0)] = NAN;

        let stats = reconcile_parallel(&mut dir, &mut upa, &den);

        assert_eq!(stats.area_masked, 1);
        assert!(upa[(0, 0)].is_nan());
        assert!(upa.data()[1..].iter().all(|&a| a == 123_456_789.123));
    }

    #[test]
    fn test_border_cells_are_not_neighbor_checked() {
        // Row 0 and column 0 point north (off grid); interior density defined.
        let mut dir = Grid2D::filled(5, 5, 4u8);
        for c in 0..5 {
            dir[(0, c)] = 64;
        }
        for r in 0..5 {
            dir[(r, 0)] = 64;
        }
        let original = dir.clone();
        let mut upa = Grid2D::filled(5, 5, 1.0f32);
        let den = Grid2D::filled(5, 5, 0.5f32);

        let stats = reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir, original);
        assert_eq!(stats.total_cleared(), 0);
    }

    #[test]
    fn test_border_cell_keeps_code_pointing_into_undefined_neighbor() {
        let mut dir = Grid2D::filled(3, 3, 0u8);
        dir[(0, 0)] = 1; // east, toward (0, 1)
        let mut upa = Grid2D::filled(3, 3, 1.0f32);
        let mut den = Grid2D::filled(3, 3, 1.0f32);
        den[(0, 1)] = NAN;

        reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir[(0, 0)], 1);
    }

    #[test]
    fn test_all_undefined_clears_everything() {
        let mut dir = grid(3, 4, vec![1, 2, 4, 8, 16, 32, 64, 128, 0, 1, 2, 4]);
        let mut upa = Grid2D::filled(3, 4, 3.0f32);
        let den = Grid2D::filled(3, 4, NAN);

        reconcile(&mut dir, &mut upa, &den);

        assert!(dir.data().iter().all(|&c| c == 0));
        assert!(upa.data().iter().all(|a| a.is_nan()));
    }

    #[test]
    fn test_pass2_reads_density_not_cleared_codes() {
        // (1,1) drains south into (2,1) whose own code gets cleared by its
        // neighbor check; (1,1) must survive because den at (2,1) is defined.
        let mut dir = Grid2D::filled(4, 3, 0u8);
        dir[(1, 1)] = 4;
        dir[(2, 1)] = 4;
        let mut upa = Grid2D::filled(4, 3, 1.0f32);
        let mut den = Grid2D::filled(4, 3, 1.0f32);
        den[(3, 1)] = NAN;

        reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir[(1, 1)], 4);
        assert_eq!(dir[(2, 1)], 0);
    }

    #[test]
    fn test_infinite_density_is_undefined() {
        let mut dir = Grid2D::filled(3, 3, 4u8);
        let mut upa = Grid2D::filled(3, 3, 1.0f32);
        let mut den = Grid2D::filled(3, 3, 1.0f32);
        den[(2, 1)] = f32::INFINITY;

        reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir[(1, 1)], 0);
        assert_eq!(dir[(2, 1)], 0);
        assert!(upa[(2, 1)].is_nan());
    }

    #[test]
    fn test_tiny_grids_only_gate() {
        let mut dir = grid(2, 2, vec![1, 4, 16, 64]);
        let mut upa = Grid2D::filled(2, 2, 1.0f32);
        let den = grid(2, 2, vec![1.0, NAN, 1.0, 1.0]);

        reconcile(&mut dir, &mut upa, &den);

        assert_eq!(dir.data(), &[1, 0, 16, 64]);
    }

    #[test]
    #[should_panic(expected = "precondition")]
    fn test_shape_mismatch_panics() {
        let mut dir = Grid2D::filled(3, 3, 0u8);
        let mut upa = Grid2D::filled(3, 4, 0.0f32);
        let den = Grid2D::filled(3, 3, 0.0f32);
        reconcile(&mut dir, &mut upa, &den);
    }

    #[test]
    #[should_panic(expected = "invalid D8 code 3")]
    fn test_invalid_code_panics() {
        let mut dir = Grid2D::filled(3, 3, 0u8);
        dir[(2, 2)] = 3;
        let mut upa = Grid2D::filled(3, 3, 0.0f32);
        let den = Grid2D::filled(3, 3, 0.0f32);
        reconcile(&mut dir, &mut upa, &den);
    }

    #[test]
    fn test_check_alignment_reports_offender() {
        let dir = Grid2D::filled(3, 3, 0u8);
        let upa = Grid2D::filled(2, 3, 0.0f32);
        let den = Grid2D::filled(3, 3, 0.0f32);
        match check_alignment(&dir, &upa, &den) {
            Err(HydroError::ShapeMismatch { name, expected, found }) => {
                assert_eq!(name, "upa");
                assert_eq!(expected, (3, 3));
                assert_eq!(found, (2, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows = 7;
        let cols = 6;
        let codes = [0u8, 1, 2, 4, 8, 16, 32, 64, 128];
        let dir: Grid2D<u8> = grid(
            rows,
            cols,
            (0..rows * cols).map(|i| codes[(i * 5) % 9]).collect(),
        );
        let den: Grid2D<f32> = grid(
            rows,
            cols,
            (0..rows * cols)
                .map(|i| if i % 4 == 0 { NAN } else { i as f32 })
                .collect(),
        );
        let upa: Grid2D<f32> = Grid2D::filled(rows, cols, 2.0);

        let (mut d1, mut u1) = (dir.clone(), upa.clone());
        let (mut d2, mut u2) = (dir, upa);
        let s1 = reconcile(&mut d1, &mut u1, &den);
        let s2 = reconcile_parallel(&mut d2, &mut u2, &den);

        assert_eq!(d1, d2);
        assert_eq!(s1, s2);
        for (a, b) in u1.data().iter().zip(u2.data()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
}
