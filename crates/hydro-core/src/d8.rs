//! D8 flow-direction codes.
//!
//! Each non-zero code is a single bit naming one of the eight neighbors in
//! row/column index space (row grows southward, column grows eastward):
//!
//! ```text
//!    32  64  128
//!    16   .    1
//!     8   4    2
//! ```
//!
//! `0` means no outflow.

/// Code stored for a cell with no outflow.
pub const NO_FLOW: u8 = 0;

/// One of the eight compass neighbors a cell can drain into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum D8Direction {
    East = 1,
    SouthEast = 2,
    South = 4,
    SouthWest = 8,
    West = 16,
    NorthWest = 32,
    North = 64,
    NorthEast = 128,
}

impl D8Direction {
    /// All directions in ascending code order.
    pub const ALL: [D8Direction; 8] = [
        D8Direction::East,
        D8Direction::SouthEast,
        D8Direction::South,
        D8Direction::SouthWest,
        D8Direction::West,
        D8Direction::NorthWest,
        D8Direction::North,
        D8Direction::NorthEast,
    ];

    /// Decode a stored code. Returns None for `0` and for any value that is
    /// not one of the eight single-bit codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(D8Direction::East),
            2 => Some(D8Direction::SouthEast),
            4 => Some(D8Direction::South),
            8 => Some(D8Direction::SouthWest),
            16 => Some(D8Direction::West),
            32 => Some(D8Direction::NorthWest),
            64 => Some(D8Direction::North),
            128 => Some(D8Direction::NorthEast),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `(Δrow, Δcol)` of the neighbor this direction drains into.
    pub fn offset(self) -> (isize, isize) {
        match self {
            D8Direction::East => (0, 1),
            D8Direction::SouthEast => (1, 1),
            D8Direction::South => (1, 0),
            D8Direction::SouthWest => (1, -1),
            D8Direction::West => (0, -1),
            D8Direction::NorthWest => (-1, -1),
            D8Direction::North => (-1, 0),
            D8Direction::NorthEast => (-1, 1),
        }
    }

    /// Neighbor of `(row, col)` in this direction.
    ///
    /// The caller guarantees `(row, col)` is at least one cell away from the
    /// grid edge.
    pub fn neighbor(self, row: usize, col: usize) -> (usize, usize) {
        let (dr, dc) = self.offset();
        (
            row.wrapping_add_signed(dr),
            col.wrapping_add_signed(dc),
        )
    }
}

/// True for `0` and the eight single-bit direction codes.
pub fn is_valid_code(code: u8) -> bool {
    code == NO_FLOW || D8Direction::from_code(code).is_some()
}
