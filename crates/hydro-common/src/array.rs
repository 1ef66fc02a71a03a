//! Row-major 2-D grid storage.

use std::ops::{Index, IndexMut, Range};

use crate::error::{HydroError, HydroResult};

/// A dense H×W grid stored in row-major order (row 0 first).
///
/// Row indices follow the latitude coordinate, column indices the longitude
/// coordinate of the associated [`GridCoords`](crate::GridCoords).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Grid2D<T> {
    /// Wrap row-major data, checking its length against the shape.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> HydroResult<Self> {
        if data.len() != rows * cols {
            return Err(HydroError::DataLength {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at a cell, or None outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy out the sub-grid covering `rows` × `cols`.
    pub fn crop(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for r in rows.clone() {
            data.extend_from_slice(&self.row(r)[cols.clone()]);
        }
        Self {
            data,
            rows: rows.len(),
            cols: cols.len(),
        }
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid2D<U> {
        Grid2D {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid2D<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid2D<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Grid2D::from_vec(vec![0.0f32; 6], 2, 3).is_ok());
        assert!(matches!(
            Grid2D::from_vec(vec![0.0f32; 5], 2, 3),
            Err(HydroError::DataLength { len: 5, rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid2D::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(grid[(0, 2)], 3);
        assert_eq!(grid[(1, 0)], 4);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_crop() {
        let grid = Grid2D::from_vec((0..12).collect(), 3, 4).unwrap();
        let sub = grid.crop(1..3, 1..3);
        assert_eq!(sub.shape(), (2, 2));
        assert_eq!(sub.data(), &[5, 6, 9, 10]);
    }
}
