//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may extend above row 0; those cells are never read or written.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows cleared in one pass
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Result of a line-clear pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClearInfo {
    /// Original row indices of the cleared rows, bottom-to-top.
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
}

impl LineClearInfo {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x as i16, y as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x as i16, y as i16) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Check whether `shape` fits with its top-left corner at (x, y).
    ///
    /// Columns must stay inside the board and rows below the floor are rejected.
    /// Rows above the top edge are allowed and never collide.
    pub fn is_valid(&self, shape: &Shape, x: i8, y: i8) -> bool {
        for (r, c) in shape.cells() {
            let bx = x as i16 + c as i16;
            let by = y as i16 + r as i16;

            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return false;
            }
            if by >= 0 {
                if let Some(idx) = Self::index(bx, by) {
                    if self.cells[idx].is_some() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Write the piece's kind into every occupied, in-bounds cell
    pub fn fix(&mut self, piece: &Piece) {
        for (r, c) in piece.shape.cells() {
            let bx = piece.x as i16 + c as i16;
            let by = piece.y as i16 + r as i16;
            if let Some(idx) = Self::index(bx, by) {
                self.cells[idx] = Some(piece.kind);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows, compacting the rest downwards.
    ///
    /// Uses a two-pointer pass from the bottom with zero allocation. Empty rows
    /// fill the top. The returned indices are the rows' positions before the
    /// pass, in bottom-to-top order.
    pub fn clear_lines(&mut self) -> LineClearInfo {
        let mut info = LineClearInfo::default();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                info.rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        info
    }

    /// Lowest row the piece reaches by falling straight down from its position
    pub fn ghost_drop_row(&self, piece: &Piece) -> i8 {
        let mut row = piece.y;
        while self.is_valid(&piece.shape, piece.x, row + 1) {
            row += 1;
        }
        row
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Board as rows of cells (for snapshots)
    pub fn rows(&self) -> [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let width = BOARD_WIDTH as usize;
        let mut out = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
        out
    }

    /// Fill a whole row with `kind`, leaving `gaps` empty (test helper)
    pub fn fill_row(&mut self, y: i8, kind: PieceKind, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeSet;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_valid_allows_rows_above_top() {
        let board = Board::new();
        let t = ShapeSet::canonical().get(PieceKind::T).unwrap();
        assert!(board.is_valid(&t, 3, -1));
        assert!(board.is_valid(&t, 3, -5));
    }

    #[test]
    fn test_is_valid_ignores_empty_matrix_cells() {
        let mut board = Board::new();
        // T spawn matrix has empty corners on its top row.
        let t = ShapeSet::canonical().get(PieceKind::T).unwrap();
        board.set(3, 0, Some(PieceKind::I));
        assert!(board.is_valid(&t, 3, 0));
        board.set(4, 0, Some(PieceKind::I));
        assert!(!board.is_valid(&t, 3, 0));
    }

    #[test]
    fn test_clear_lines_reports_original_indices() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::I, &[]);
        board.fill_row(18, PieceKind::O, &[4]);
        board.fill_row(17, PieceKind::T, &[]);

        let info = board.clear_lines();
        assert_eq!(info.rows.as_slice(), &[19, 17]);
        // Partial row 18 drops to the floor.
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(4, 19), Some(None));
        assert!(!board.is_row_full(18));
    }
}
