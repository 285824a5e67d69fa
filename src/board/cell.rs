//! Board coordinates.
//!
//! The board is a fixed 12x12 grid, row-major, with (0,0) at the
//! north-west corner. Rows grow southward, columns grow eastward.

use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: i8 = 12;

/// A cell on the 12x12 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

/// The four orthogonal step offsets.
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The four diagonal step offsets.
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight king-step offsets.
pub const AROUND: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The eight L-shaped knight offsets.
pub const KNIGHT: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl Cell {
    pub const fn new(row: i8, col: i8) -> Cell {
        Cell { row, col }
    }

    /// Returns true if the cell lies on the board.
    pub const fn on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Returns the cell offset by (dr, dc), or None if it leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Cell> {
        let c = Cell::new(self.row + dr, self.col + dc);
        if c.on_board() {
            Some(c)
        } else {
            None
        }
    }

    /// Point reflection through the board's center: (r,c) -> (11-r, 11-c).
    pub const fn reflected(self) -> Cell {
        Cell::new(BOARD_SIZE - 1 - self.row, BOARD_SIZE - 1 - self.col)
    }

    /// Chebyshev (king-move) distance to another cell.
    pub fn chebyshev(self, other: Cell) -> i32 {
        let dr = (self.row - other.row).abs() as i32;
        let dc = (self.col - other.col).abs() as i32;
        dr.max(dc)
    }

    /// Chebyshev distance to the board's center point (between the four
    /// central cells), so the innermost ring scores 0.5.
    pub fn center_distance(self) -> f32 {
        let mid = (BOARD_SIZE - 1) as f32 / 2.0;
        let dr = (self.row as f32 - mid).abs();
        let dc = (self.col as f32 - mid).abs();
        dr.max(dc)
    }

    /// Iterates every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| Cell::new(r, c)))
    }

    /// Iterates the on-board cells among the eight neighbors.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        AROUND.iter().filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }
}
