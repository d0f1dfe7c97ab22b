//! Shape module - occupancy matrices and the per-kind shape table
//!
//! A shape is a small 0/1 matrix (at most 4x4) anchored at its top-left corner.
//! Rotation produces a new matrix with swapped dimensions instead of indexing a
//! precomputed rotation table.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest supported matrix dimension.
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// The degenerate single-cell shape used when a definition is missing.
    pub const SINGLE: Shape = Shape {
        rows: 1,
        cols: 1,
        cells: [
            [true, false, false, false],
            [false; MAX_SHAPE_DIM],
            [false; MAX_SHAPE_DIM],
            [false; MAX_SHAPE_DIM],
        ],
    };

    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for empty or ragged input, dimensions above 4, or any
    /// value other than 0 and 1.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        if height == 0 || height > MAX_SHAPE_DIM {
            return None;
        }
        let width = rows[0].as_ref().len();
        if width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                match v {
                    0 => {}
                    1 => cells[r][c] = true,
                    _ => return None,
                }
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Number of matrix rows
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Number of matrix columns
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) is occupied. Out of range is empty.
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.cells[row as usize][col as usize]
    }

    /// Occupied cells as (row, col) offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r as usize][c as usize])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Clockwise quarter turn: `new[c][rows - 1 - r] = old[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let rows = self.rows as usize;
        for r in 0..rows {
            for c in 0..self.cols as usize {
                if self.cells[r][c] {
                    cells[c][rows - 1 - r] = true;
                }
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Matrix as rows of 0/1 values (for previews and shape files).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| u8::from(self.cells[r][c]))
                    .collect()
            })
            .collect()
    }
}

/// Canonical spawn orientation for each kind.
fn canonical_rows(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => &[&[1, 1, 1, 1]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
        PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
    }
}

/// Per-kind spawn shapes.
///
/// The default set holds the canonical seven tetrominoes. Sets loaded from
/// external definitions may lack some kinds; spawning such a kind falls back to
/// [`Shape::SINGLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSet {
    shapes: [Option<Shape>; 7],
}

impl ShapeSet {
    /// A set with no definitions at all.
    pub fn empty() -> Self {
        Self { shapes: [None; 7] }
    }

    /// The canonical tetromino table.
    pub fn canonical() -> Self {
        let mut set = Self::empty();
        for kind in PieceKind::ALL {
            set.shapes[kind.index()] = Shape::from_rows(canonical_rows(kind));
        }
        set
    }

    pub fn set(&mut self, kind: PieceKind, shape: Shape) {
        self.shapes[kind.index()] = Some(shape);
    }

    pub fn remove(&mut self, kind: PieceKind) {
        self.shapes[kind.index()] = None;
    }

    pub fn get(&self, kind: PieceKind) -> Option<Shape> {
        self.shapes[kind.index()]
    }

    /// Spawn shape for `kind`, or [`Shape::SINGLE`] when it has none.
    ///
    /// Silent: it runs on every spawn and every preview. Loaders report
    /// missing kinds once, see [`ShapeSet::missing`].
    pub fn shape_or_fallback(&self, kind: PieceKind) -> Shape {
        self.get(kind).unwrap_or(Shape::SINGLE)
    }

    /// Kinds without a shape, in [`PieceKind::ALL`] order.
    pub fn missing(&self) -> ArrayVec<PieceKind, 7> {
        PieceKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::canonical()
    }
}
