//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered, row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `ORIGINAL_DROP_INTERVAL_MS` | 1000 | Gravity at level 0 (and with dynamic speed off) |
//! | `MIN_DROP_INTERVAL_MS` | 100 | Gravity floor |
//! | `DROP_INTERVAL_REDUCTION_PER_LEVEL_MS` | 65 | Gravity speed-up per level |
//! | `LOCK_DELAY_MS` | 200 | Grace period before a resting piece locks |
//! | `LINE_CLEAR_ANIMATION_MS` | 350 | Flash duration for 1-3 line clears |
//! | `TETRIS_ANIMATION_MS` | 600 | Flash duration for 4 line clears |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 935ms |
//! | 5 | 675ms |
//! | 10 | 350ms |
//! | 15 (max) | 100ms |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Size of one board cell in pointer pixels.
///
/// Drag distances are converted to columns relative to this size.
pub const BLOCK_SIZE: u32 = 30;

/// Frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0, and the fixed interval when dynamic speed is off
pub const ORIGINAL_DROP_INTERVAL_MS: u32 = 1000;

/// Fastest gravity interval
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Gravity interval reduction per level
pub const DROP_INTERVAL_REDUCTION_PER_LEVEL_MS: u32 = 65;

/// Points needed for the first level-up; later thresholds scale by the multiplier
pub const BASE_POINTS_TO_LEVEL_UP: u32 = 2000;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 15;

/// Lock delay once a piece rests on a surface
pub const LOCK_DELAY_MS: u32 = 200;

/// Flash duration for a 1-3 line clear
pub const LINE_CLEAR_ANIMATION_MS: u32 = 350;

/// Flash duration for a 4 line clear
pub const TETRIS_ANIMATION_MS: u32 = 600;

/// Base points per number of lines cleared (index = line count)
///
/// Multiplied by the level multiplier and rounded.
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 220, 350, 500];

/// Number of entries kept in the high-score list
pub const MAX_HIGH_SCORES: usize = 5;

/// Pointer gesture: maximum duration of a tap
pub const TAP_DURATION_MS: u64 = 250;

/// Pointer gesture: maximum displacement (each axis) of a tap
pub const TAP_MOVEMENT_PX: f32 = 20.0;

/// Pointer gesture: minimum vertical displacement of a swipe
pub const VERTICAL_SWIPE_PX: f32 = 50.0;

/// Pointer gesture: vertical displacement must be this many times the horizontal one
pub const SWIPE_DOMINANCE: f32 = 1.5;

/// Pointer gesture: fraction of `BLOCK_SIZE` a drag must cover per column
pub const DRAG_SENSITIVITY: f32 = 0.8;

/// Persistence key for the high-score list
pub const HIGH_SCORES_KEY: &str = "falling_blocks.high_scores.v1";

/// Persistence key for the selected theme
pub const THEME_KEY: &str = "falling_blocks.theme";

/// Persistence key for the dynamic speed toggle
pub const DYNAMIC_SPEED_KEY: &str = "falling_blocks.dynamic_speed";

/// Persistence key for the sound effects mute toggle
pub const SFX_MUTED_KEY: &str = "falling_blocks.sfx_muted";


/// The seven piece kinds
///
/// - **I**: horizontal bar
/// - **O**: 2x2 square (does not rotate)
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter used in shape files and the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Coarse session phase.
///
/// MENU → PLAYING → {PAUSED ⇄ PLAYING, GAMEOVER} → MENU | PLAYING.
/// HIGH_SCORES is only reachable from MENU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    HighScores,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
            GamePhase::HighScores => "highScores",
        }
    }
}

/// Discrete game actions
///
/// Produced by keyboard mapping and consumed by the session. Gameplay actions
/// only apply while playing; the menu actions are interpreted per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row; locks immediately on contact
    SoftDrop,
    /// Drop piece to its landing row and start the lock delay
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Exchange current and next piece (once per spawn)
    Swap,
    /// Toggle pause
    Pause,
    /// Start from the menu, continue after game over, or resume when paused
    Start,
    /// Restart with score and level reset
    Restart,
    /// Return to the main menu
    Menu,
    /// Show the high-score table (from the menu only)
    HighScores,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("swap"), Some(GameAction::Swap));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "swap" => Some(GameAction::Swap),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            "menu" => Some(GameAction::Menu),
            "highscores" => Some(GameAction::HighScores),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Swap => "swap",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::Menu => "menu",
            GameAction::HighScores => "highScores",
        }
    }

    /// Whether the action manipulates the falling piece
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::HardDrop
                | GameAction::Rotate
                | GameAction::Swap
        )
    }
}

/// Fire-and-forget audio notifications emitted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    LineClear,
    TetrisClear,
    GameOver,
    NewHighScore,
    ButtonClick,
}

/// Flavor of a line-clear animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClearKind {
    /// 1-3 lines
    Normal,
    /// 4 lines
    Tetris,
}

impl LineClearKind {
    pub fn for_count(lines: usize) -> Self {
        if lines == 4 {
            LineClearKind::Tetris
        } else {
            LineClearKind::Normal
        }
    }

    pub fn duration_ms(&self) -> u32 {
        match self {
            LineClearKind::Normal => LINE_CLEAR_ANIMATION_MS,
            LineClearKind::Tetris => TETRIS_ANIMATION_MS,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
