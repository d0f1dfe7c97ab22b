//! Piece module - the falling piece and its movement primitives
//!
//! A piece is a kind, a shape matrix and the board position of the matrix's
//! top-left corner. Movement primitives check validity against a board and
//! either apply the move or leave the piece untouched.

use crate::board::Board;
use crate::shape::{Shape, ShapeSet};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Horizontal kick offsets tried in order when rotating
pub const ROTATION_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` at the spawn position: centered, row 0
    pub fn spawn(kind: PieceKind, shapes: &ShapeSet) -> Self {
        let shape = shapes.shape_or_fallback(kind);
        let x = (BOARD_WIDTH as i8 - shape.width() as i8) / 2;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    /// Check whether the piece fits at its current position
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid(&self.shape, self.x, self.y)
    }

    /// Check whether the piece would fit after moving by (dx, dy)
    pub fn is_valid_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        board.is_valid(&self.shape, self.x + dx, self.y + dy)
    }

    /// Whether the piece cannot fall any further
    pub fn is_resting(&self, board: &Board) -> bool {
        !self.is_valid_at(board, 0, 1)
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1)
    }

    fn shift(&mut self, board: &Board, dx: i8) -> bool {
        if self.is_valid_at(board, dx, 0) {
            self.x += dx;
            true
        } else {
            false
        }
    }

    /// Fall one row.
    ///
    /// Returns `true` when the piece is blocked (it does not move); `false`
    /// when it advanced. Contact is only reported here, never acted on.
    pub fn move_down(&mut self, board: &Board) -> bool {
        if self.is_valid_at(board, 0, 1) {
            self.y += 1;
            false
        } else {
            true
        }
    }

    /// Rotate clockwise with horizontal kicks.
    ///
    /// The O piece never rotates. Returns whether the rotation was applied.
    pub fn rotate(&mut self, board: &Board) -> bool {
        if self.kind == PieceKind::O {
            return false;
        }

        let rotated = self.shape.rotated_cw();
        for dx in ROTATION_KICKS {
            let x = self.x + dx;
            if board.is_valid(&rotated, x, self.y) {
                self.shape = rotated;
                self.x = x;
                return true;
            }
        }
        false
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c, self.y + r))
    }
}
