//! Pointer gestures: tap, vertical swipe and horizontal drag.
//!
//! A gesture runs from press to release. While it moves, a mostly-horizontal
//! displacement turns it into a drag that walks the piece column by column
//! toward the pointer. On release, a gesture that never became a drag is
//! classified as a tap (rotate) or a vertical swipe (up pauses, down hard
//! drops).
//!
//! Positions are in pointer pixels, where one board cell is `BLOCK_SIZE`
//! pixels wide.

use crate::core::GameControls;
use crate::types::{
    GamePhase, BLOCK_SIZE, DRAG_SENSITIVITY, SWIPE_DOMINANCE, TAP_DURATION_MS, TAP_MOVEMENT_PX,
    VERTICAL_SWIPE_PX,
};

/// How a finished gesture was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Short, still press: rotate
    Tap,
    /// Upward swipe: pause
    SwipeUp,
    /// Downward swipe: hard drop
    SwipeDown,
    /// Horizontal drag (moves were applied while tracking)
    Drag,
    /// Nothing recognised, or no gesture in progress
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    start_x: f32,
    start_y: f32,
    start_ms: u64,
    /// Piece column the drag target is measured from
    anchor_col: i8,
    dragging: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    active: Option<Gesture>,
}

/// Pixels of horizontal travel per board column
pub fn drag_column_px() -> f32 {
    BLOCK_SIZE as f32 * DRAG_SENSITIVITY
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.map(|g| g.dragging).unwrap_or(false)
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Start a gesture. Only accepted while playing with a piece in play.
    pub fn begin<C: GameControls + ?Sized>(&mut self, game: &C, x: f32, y: f32, now_ms: u64) -> bool {
        if game.phase() != GamePhase::Playing {
            return false;
        }
        let Some(piece) = game.current_piece() else {
            return false;
        };

        self.active = Some(Gesture {
            start_x: x,
            start_y: y,
            start_ms: now_ms,
            anchor_col: piece.x,
            dragging: false,
        });
        true
    }

    /// Track pointer movement. Returns whether the piece moved.
    pub fn update<C: GameControls + ?Sized>(&mut self, game: &mut C, x: f32, y: f32) -> bool {
        let Some(gesture) = self.active.as_mut() else {
            return false;
        };
        if game.phase() != GamePhase::Playing || game.current_piece().is_none() {
            return false;
        }

        let dx = x - gesture.start_x;
        let dy = y - gesture.start_y;
        let lock_px = TAP_MOVEMENT_PX / 2.0;

        // Once vertical, a gesture stays out of drag mode until horizontal wins clearly.
        let vertical = !gesture.dragging && dy.abs() > dx.abs() && dy.abs() > lock_px;
        if !vertical && dx.abs() > dy.abs() && dx.abs() > lock_px {
            gesture.dragging = true;
        }
        if !gesture.dragging {
            return false;
        }

        let columns = (dx / drag_column_px()).floor() as i32;
        let target = gesture.anchor_col as i32 + columns;
        let mut moved = false;

        while let Some(col) = game.current_piece().map(|p| p.x as i32) {
            if col == target {
                break;
            }
            let stepped = if target > col {
                game.move_right()
            } else {
                game.move_left()
            };
            if !stepped {
                // Blocked: measure further travel from here.
                gesture.anchor_col = col as i8;
                gesture.start_x = x;
                break;
            }
            moved = true;
        }
        moved
    }

    /// Finish the gesture and apply a tap or swipe.
    pub fn end<C: GameControls + ?Sized>(&mut self, game: &mut C, x: f32, y: f32, now_ms: u64) -> GestureOutcome {
        let Some(gesture) = self.active.take() else {
            return GestureOutcome::Ignored;
        };
        if game.phase() != GamePhase::Playing || game.current_piece().is_none() {
            return GestureOutcome::Ignored;
        }
        if gesture.dragging {
            return GestureOutcome::Drag;
        }

        let held_ms = now_ms.saturating_sub(gesture.start_ms);
        let dx = x - gesture.start_x;
        let dy = y - gesture.start_y;

        if held_ms < TAP_DURATION_MS && dx.abs() < TAP_MOVEMENT_PX && dy.abs() < TAP_MOVEMENT_PX {
            game.rotate();
            return GestureOutcome::Tap;
        }

        if dy.abs() > VERTICAL_SWIPE_PX && dy.abs() > dx.abs() * SWIPE_DOMINANCE {
            if dy < 0.0 {
                game.pause();
                return GestureOutcome::SwipeUp;
            }
            game.hard_drop();
            return GestureOutcome::SwipeDown;
        }

        GestureOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Piece, ShapeSet};
    use crate::types::PieceKind;

    struct Scripted {
        board: Board,
        piece: Piece,
        rotations: u32,
        paused: bool,
        hard_drops: u32,
    }

    impl Scripted {
        fn new(kind: PieceKind, x: i8) -> Self {
            let mut piece = Piece::spawn(kind, &ShapeSet::canonical());
            piece.x = x;
            piece.y = 5;
            Self {
                board: Board::new(),
                piece,
                rotations: 0,
                paused: false,
                hard_drops: 0,
            }
        }
    }

    impl GameControls for Scripted {
        fn phase(&self) -> GamePhase {
            if self.paused {
                GamePhase::Paused
            } else {
                GamePhase::Playing
            }
        }
        fn current_piece(&self) -> Option<&Piece> {
            Some(&self.piece)
        }
        fn move_left(&mut self) -> bool {
            self.piece.move_left(&self.board)
        }
        fn move_right(&mut self) -> bool {
            self.piece.move_right(&self.board)
        }
        fn rotate(&mut self) -> bool {
            self.rotations += 1;
            self.piece.rotate(&self.board)
        }
        fn soft_drop(&mut self) -> bool {
            !self.piece.move_down(&self.board)
        }
        fn hard_drop(&mut self) -> bool {
            self.hard_drops += 1;
            true
        }
        fn swap(&mut self) -> bool {
            false
        }
        fn pause(&mut self) -> bool {
            self.paused = true;
            true
        }
    }

    #[test]
    fn test_drag_column_width() {
        assert!((drag_column_px() - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_tap_rotates() {
        let mut game = Scripted::new(PieceKind::T, 3);
        let mut tracker = GestureTracker::new();
        assert!(tracker.begin(&game, 100.0, 100.0, 0));
        assert_eq!(tracker.end(&mut game, 105.0, 95.0, 100), GestureOutcome::Tap);
        assert_eq!(game.rotations, 1);
    }

    #[test]
    fn test_slow_press_is_not_a_tap() {
        let mut game = Scripted::new(PieceKind::T, 3);
        let mut tracker = GestureTracker::new();
        tracker.begin(&game, 100.0, 100.0, 0);
        assert_eq!(tracker.end(&mut game, 100.0, 100.0, 250), GestureOutcome::Ignored);
        assert_eq!(game.rotations, 0);
    }

    #[test]
    fn test_swipes() {
        let mut game = Scripted::new(PieceKind::T, 3);
        let mut tracker = GestureTracker::new();
        tracker.begin(&game, 100.0, 100.0, 0);
        assert_eq!(tracker.end(&mut game, 110.0, 170.0, 400), GestureOutcome::SwipeDown);
        assert_eq!(game.hard_drops, 1);

        let mut game = Scripted::new(PieceKind::T, 3);
        tracker.begin(&game, 100.0, 100.0, 0);
        assert_eq!(tracker.end(&mut game, 100.0, 40.0, 100), GestureOutcome::SwipeUp);
        assert!(game.paused);
    }

    #[test]
    fn test_swipe_needs_vertical_dominance() {
        let mut game = Scripted::new(PieceKind::T, 3);
        let mut tracker = GestureTracker::new();
        tracker.begin(&game, 100.0, 100.0, 0);
        // 60 down, 45 across: 60 < 1.5 * 45
        assert_eq!(tracker.end(&mut game, 145.0, 160.0, 100), GestureOutcome::Ignored);
        assert_eq!(game.hard_drops, 0);
    }

    #[test]
    fn test_small_leftward_drag_moves_one_column() {
        let mut game = Scripted::new(PieceKind::I, 3);
        let mut tracker = GestureTracker::new();
        tracker.begin(&game, 100.0, 100.0, 0);

        // floor(-12 / 24) = -1, while floor(12 / 24) = 0.
        assert!(tracker.update(&mut game, 88.0, 100.0));
        assert_eq!(game.piece.x, 2);
        assert!(tracker.update(&mut game, 112.0, 100.0));
        assert_eq!(game.piece.x, 3);
    }

    #[test]
    fn test_drag_never_classifies_as_tap() {
        let mut game = Scripted::new(PieceKind::I, 3);
        let mut tracker = GestureTracker::new();
        tracker.begin(&game, 100.0, 100.0, 0);
        tracker.update(&mut game, 112.0, 100.0);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.end(&mut game, 100.0, 100.0, 50), GestureOutcome::Drag);
        assert_eq!(game.rotations, 0);
    }
}
