//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::theme::Theme;
use crate::types::{GamePhase, LineClearKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Columns reserved for the side panel
pub const PANEL_W: u16 = 24;
const PANEL_GAP: u16 = 2;
/// Preview box size in board cells
pub const PREVIEW_CELLS: u16 = 4;
/// Panel row (relative to the frame top) where the preview box starts
const NEXT_PREVIEW_ROW: u16 = 8;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal area in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

/// Where things land on screen for a given viewport.
///
/// The runner uses `board` and `next_preview` to route mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Board including its border
    pub frame: Rect,
    /// Playfield, one board cell = `cell_w` x `cell_h` characters
    pub board: Rect,
    /// Next-piece box; empty when the panel does not fit
    pub next_preview: Rect,
    pub panel_x: u16,
    pub show_panel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

#[derive(Debug, Clone, Copy)]
enum OverlayLine {
    Blank,
    Title(&'static str),
    Text(&'static str),
    Number(&'static str, u32),
}

const RANK_LABELS: [&str; 5] = ["1.", "2.", "3.", "4.", "5."];

/// A lightweight terminal renderer for the falling-blocks game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    theme: Theme,
    muted: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            theme: Theme::default(),
            muted: false,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let show_panel = viewport.width >= total_w;
        let used_w = if show_panel { total_w } else { frame_w };

        let start_x = viewport.width.saturating_sub(used_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let panel_x = start_x + frame_w + PANEL_GAP;

        let next_preview = if show_panel {
            Rect {
                x: panel_x,
                y: start_y + NEXT_PREVIEW_ROW,
                w: PREVIEW_CELLS * self.cell_w,
                h: PREVIEW_CELLS * self.cell_h,
            }
        } else {
            Rect::default()
        };

        Layout {
            frame: Rect {
                x: start_x,
                y: start_y,
                w: frame_w,
                h: frame_h,
            },
            board: Rect {
                x: start_x + 1,
                y: start_y + 1,
                w: board_w,
                h: board_h,
            },
            next_preview,
            panel_x,
            show_panel,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let t = &self.theme;
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(t.text, t.body_bg),
        });

        let layout = self.layout(viewport);
        let board = layout.board;

        fb.fill_rect(board.x, board.y, board.w, board.h, ' ', CellStyle::new(t.grid, t.board_bg));
        self.draw_border(fb, layout.frame, CellStyle::new(t.border, t.body_bg));

        // Locked cells and grid.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(kind) => {
                        let style = CellStyle::new(t.piece_color(kind), t.board_bg);
                        self.fill_board_cell(fb, board, x, y, '█', style);
                    }
                    None => {
                        let style = CellStyle {
                            dim: true,
                            ..CellStyle::new(t.grid, t.board_bg)
                        };
                        self.fill_board_cell(fb, board, x, y, '·', style);
                    }
                }
            }
        }

        // Line-clear flashes fade out over their duration.
        for anim in snap.animations.iter() {
            let base = match anim.kind {
                LineClearKind::Normal => t.accent,
                LineClearKind::Tetris => t.text,
            };
            let color = base.blend_over(t.board_bg, 1.0 - anim.progress());
            let style = CellStyle::new(color, t.board_bg);
            for &row in anim.rows.iter() {
                for x in 0..BOARD_WIDTH as u16 {
                    self.fill_board_cell(fb, board, x, row as u16, '█', style);
                }
            }
        }

        if let (Some(current), Some(ghost_y)) = (snap.current, snap.ghost_y) {
            let ghost = PieceSnapshot {
                y: ghost_y,
                ..current
            };
            self.draw_piece(fb, board, &ghost, '░', CellStyle::new(t.ghost, t.board_bg));
        }

        if let Some(current) = snap.current {
            let style = CellStyle {
                bold: true,
                ..CellStyle::new(t.piece_color(current.kind), t.board_bg)
            };
            self.draw_piece(fb, board, &current, '█', style);
        }

        if layout.show_panel {
            self.draw_side_panel(fb, snap, &layout, viewport);
        }

        self.draw_overlay(fb, snap, layout.frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
        if r.w < 2 || r.h < 2 {
            return;
        }
        let (x, y, w, h) = (r.x, r.y, r.w, r.h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        area: Rect,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = area.x + cell_x * self.cell_w;
        let py = area.y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Draw piece cells that fall inside the board.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        board: Rect,
        piece: &PieceSnapshot,
        ch: char,
        style: CellStyle,
    ) {
        for (x, y) in piece.cells() {
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                self.fill_board_cell(fb, board, x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: &Layout,
        viewport: Viewport,
    ) {
        let t = &self.theme;
        let label = CellStyle::new(t.accent, t.body_bg).bold();
        let value = CellStyle::new(t.text, t.body_bg);
        let dim = CellStyle { dim: true, ..value };

        let x = layout.panel_x;
        let mut y = layout.frame.y;

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "LEVEL", label);
        fb.put_u32(x, y + 1, snap.level, value);
        fb.put_str(x, y + 2, "goal", dim);
        fb.put_u32(x + 5, y + 2, snap.next_level_score, dim);

        y = layout.frame.y + NEXT_PREVIEW_ROW - 1;
        fb.put_str(x, y, "NEXT", label);
        if snap.can_swap && snap.playable() {
            fb.put_str(x + 5, y, "[c] swap", dim);
        }
        self.draw_next_preview(fb, snap, layout.next_preview);

        y = layout.next_preview.y + layout.next_preview.h + 1;
        fb.put_str(x, y, "BEST", label);
        match snap.high_scores.best() {
            Some(best) => {
                fb.put_u32(x + 6, y, best, value);
            }
            None => fb.put_str(x + 6, y, "-", value),
        }
        y += 1;

        fb.put_str(x, y, "SPEED", label);
        let mode = if snap.dynamic_speed { "dynamic" } else { "fixed" };
        fb.put_str(x + 6, y, mode, value);
        let w = fb.put_u32(x + 14, y, snap.drop_interval_ms, dim);
        fb.put_str(x + 14 + w, y, "ms", dim);
        y += 1;

        fb.put_str(x, y, "SOUND", label);
        fb.put_str(x + 6, y, if self.muted { "off" } else { "on" }, value);
        y += 1;

        fb.put_str(x, y, "THEME", label);
        fb.put_str(x + 6, y, t.name, value);
        y += 2;

        let hints: [&str; 3] = ["t theme  v speed", "n sound  q quit", "p pause  esc menu"];
        for hint in hints {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, hint, dim);
            y += 1;
        }
    }

    fn draw_next_preview(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, area: Rect) {
        let t = &self.theme;
        fb.fill_rect(area.x, area.y, area.w, area.h, ' ', CellStyle::new(t.grid, t.board_bg));

        let Some(next) = snap.next else {
            return;
        };
        let cols = PREVIEW_CELLS as i8;
        let ox = (cols - next.shape.width() as i8).max(0) / 2;
        let oy = (cols - next.shape.height() as i8).max(0) / 2;
        let style = CellStyle {
            dim: !snap.can_swap,
            ..CellStyle::new(t.piece_color(next.kind), t.board_bg)
        };
        for (r, c) in next.shape.cells() {
            let (cx, cy) = (ox + c, oy + r);
            if cx < cols && cy < cols {
                self.fill_board_cell(fb, area, cx as u16, cy as u16, '█', style);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Rect) {
        use OverlayLine::*;

        match snap.phase {
            GamePhase::Playing => {}
            GamePhase::Menu => self.draw_overlay_box(
                fb,
                frame,
                &[
                    Title("FALLING BLOCKS"),
                    Blank,
                    Text("enter  start"),
                    Text("tab    scores"),
                    Text("q      quit"),
                ],
            ),
            GamePhase::Paused => self.draw_overlay_box(
                fb,
                frame,
                &[
                    Title("PAUSED"),
                    Blank,
                    Text("p      resume"),
                    Text("r      restart"),
                    Text("esc    menu"),
                ],
            ),
            GamePhase::GameOver => {
                let summary = snap.last_game.unwrap_or_default();
                let title = if summary.new_high_score {
                    "NEW HIGH SCORE!"
                } else {
                    "GAME OVER"
                };
                self.draw_overlay_box(
                    fb,
                    frame,
                    &[
                        Title(title),
                        Blank,
                        Number("score", summary.score),
                        Number("best", summary.best),
                        Blank,
                        Text("enter  continue"),
                        Text("r      restart"),
                        Text("esc    menu"),
                    ],
                );
            }
            GamePhase::HighScores => {
                let mut lines = [Blank; 9];
                lines[0] = Title("HIGH SCORES");
                let scores = snap.high_scores.as_slice();
                if scores.is_empty() {
                    lines[2] = Text("no scores yet");
                }
                for (i, &score) in scores.iter().take(RANK_LABELS.len()).enumerate() {
                    lines[2 + i] = Number(RANK_LABELS[i], score);
                }
                lines[8] = Text("esc    back");
                self.draw_overlay_box(fb, frame, &lines);
            }
        }
    }

    fn draw_overlay_box(&self, fb: &mut FrameBuffer, frame: Rect, lines: &[OverlayLine]) {
        let t = &self.theme;
        let box_w = frame.w.saturating_sub(4);
        let box_h = lines.len() as u16 + 2;
        if box_w < 8 || frame.h < box_h {
            return;
        }
        let bx = frame.x + 2;
        let by = frame.y + (frame.h - box_h) / 2;

        let body = CellStyle::new(t.text, t.body_bg);
        let title = CellStyle::new(t.accent, t.body_bg).bold();
        fb.fill_rect(bx, by, box_w, box_h, ' ', body);
        self.draw_border(
            fb,
            Rect {
                x: bx,
                y: by,
                w: box_w,
                h: box_h,
            },
            CellStyle::new(t.border, t.body_bg),
        );

        let inner_x = bx + 2;
        let inner_w = box_w.saturating_sub(4);
        for (i, line) in lines.iter().enumerate() {
            let y = by + 1 + i as u16;
            match *line {
                OverlayLine::Blank => {}
                OverlayLine::Title(s) => fb.put_str_centered(bx, box_w, y, s, title),
                OverlayLine::Text(s) => fb.put_str(inner_x, y, s, body),
                OverlayLine::Number(label, n) => {
                    fb.put_str(inner_x, y, label, body);
                    let x = (inner_x + inner_w).saturating_sub(digit_count(n));
                    fb.put_u32(x, y, n, CellStyle { bold: true, ..body });
                }
            }
        }
    }
}

fn digit_count(n: u32) -> u16 {
    let mut count = 1;
    let mut n = n / 10;
    while n > 0 {
        count += 1;
        n /= 10;
    }
    count
}

/// Foreground colour at `(x, y)`, or black off-screen.
pub fn fg_at(fb: &FrameBuffer, x: u16, y: u16) -> Rgb {
    fb.get(x, y).map(|c| c.style.fg).unwrap_or_default()
}
