use arrayvec::ArrayVec;

use crate::board::MAX_CLEARED_ROWS;
use crate::high_scores::HighScoreList;
use crate::piece::Piece;
use crate::session::{GameOverSummary, MAX_ANIMATIONS};
use crate::shape::Shape;
use crate::types::{Cell, GamePhase, LineClearKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c, self.y + r))
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSnapshot {
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
    pub kind: LineClearKind,
    pub elapsed_ms: u32,
    pub duration_ms: u32,
}

impl AnimationSnapshot {
    /// Fraction of the animation played, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Falling piece; absent in the menu and after game over
    pub current: Option<PieceSnapshot>,
    /// Landing row of the current piece, only while playing
    pub ghost_y: Option<i8>,
    /// Next piece at its spawn position
    pub next: Option<PieceSnapshot>,
    pub animations: ArrayVec<AnimationSnapshot, MAX_ANIMATIONS>,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub next_level_score: u32,
    pub high_scores: HighScoreList,
    pub last_game: Option<GameOverSummary>,
    pub can_swap: bool,
    pub landed: bool,
    pub dynamic_speed: bool,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Whether row `y` is flashing in any running animation
    pub fn row_flash(&self, y: usize) -> Option<&AnimationSnapshot> {
        self.animations.iter().find(|a| a.rows.contains(&y))
    }
}
