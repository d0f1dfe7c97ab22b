//! Mouse events to pointer-pixel events.
//!
//! Terminal mouse reports are in character cells. The board is drawn with
//! `cell_w` x `cell_h` characters per board cell, so one character maps to
//! `BLOCK_SIZE / cell_w` pixels across and `BLOCK_SIZE / cell_h` down.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::BLOCK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release { x: f32, y: f32 },
}

/// Terminal area in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl CellRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    board: CellRect,
    px_per_col: f32,
    px_per_row: f32,
}

impl PointerMapper {
    /// `board` is the playfield area; `cell_w`/`cell_h` the characters per board cell.
    pub fn new(board: CellRect, cell_w: u16, cell_h: u16) -> Self {
        Self {
            board,
            px_per_col: BLOCK_SIZE as f32 / cell_w.max(1) as f32,
            px_per_row: BLOCK_SIZE as f32 / cell_h.max(1) as f32,
        }
    }

    pub fn board(&self) -> CellRect {
        self.board
    }

    fn to_px(&self, column: u16, row: u16) -> (f32, f32) {
        let x = (column as f32 - self.board.x as f32) * self.px_per_col;
        let y = (row as f32 - self.board.y as f32) * self.px_per_row;
        (x, y)
    }

    /// Map a left-button mouse event.
    ///
    /// Presses start only inside the board; drags and releases are reported
    /// anywhere so a gesture can leave the board and still finish.
    pub fn map(&self, ev: MouseEvent) -> Option<PointerEvent> {
        let (x, y) = self.to_px(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) if self.board.contains(ev.column, ev.row) => {
                Some(PointerEvent::Press { x, y })
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { x, y }),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Release { x, y }),
            _ => None,
        }
    }
}

/// Left-button press inside `rect` (e.g. the next-piece preview)
pub fn is_click_in(ev: &MouseEvent, rect: CellRect) -> bool {
    matches!(ev.kind, MouseEventKind::Down(MouseButton::Left)) && rect.contains(ev.column, ev.row)
}
