//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed and timestamps produce identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for game tick processing
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`shape`]: Occupancy matrices, clockwise rotation and the shape table
//! - [`piece`]: The falling piece with movement and kick-based rotation
//! - [`scoring`]: Level multiplier, level thresholds and gravity speed
//! - [`high_scores`]: Top-five score list
//! - [`timer`]: Polled lock-delay timer
//! - [`rng`]: Seeded uniform piece selection
//! - [`session`]: The game state machine
//! - [`controls`]: Control surface used by input mapping
//! - [`audio`]: Sound cue sink
//! - [`snapshot`]: Render-facing view of a session
//!
//! # Game Rules
//!
//! - **Random Pieces**: Each piece kind is drawn uniformly and independently
//! - **Rotation**: Clockwise only, with horizontal kicks (0, -1, +1, -2, +2); O does not rotate
//! - **Lock Delay**: 200ms once a piece rests; sideways moves and rotations restart it
//! - **Soft Drop**: One row per press; a blocked piece locks at once
//! - **Hard Drop**: Falls to the landing row, then the lock delay applies
//! - **Swap**: Exchange current and next piece, once per spawn
//! - **Scoring**: 100/220/350/500 for 1-4 lines, times the level multiplier
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{GameSession, HighScoreList, SessionConfig, ShapeSet};
//! use falling_blocks_types::{GameAction, GamePhase};
//!
//! let mut game = GameSession::new(
//!     SessionConfig::default(),
//!     12345,
//!     ShapeSet::canonical(),
//!     HighScoreList::new(),
//! );
//! game.apply_action(GameAction::Start, 0);
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.apply_action(GameAction::HardDrop, 0);
//! assert!(game.is_landed());
//!
//! // The lock delay elapses on a later tick.
//! game.tick(200);
//! assert!(!game.is_landed());
//! ```
//!
//! # Timing
//!
//! The host calls [`GameSession::tick`](session::GameSession::tick) every frame with a
//! monotonic timestamp in milliseconds. Gravity moves the piece once the accumulated
//! time exceeds the drop interval (1000ms at level 0, 65ms faster per level, 100ms floor).

pub mod audio;
pub mod board;
pub mod controls;
pub mod high_scores;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;
pub mod timer;

pub use falling_blocks_types as types;

// Re-export commonly used types for convenience
pub use audio::{AudioSink, NullAudio};
pub use board::{Board, LineClearInfo};
pub use controls::GameControls;
pub use high_scores::HighScoreList;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{check_level_up, drop_interval_ms, points_for_lines, score_multiplier, total_score_for_level, LevelUp};
pub use session::{GameOverSummary, GameSession, LineClearAnimation, SessionConfig};
pub use shape::{Shape, ShapeSet};
pub use snapshot::{AnimationSnapshot, GameSnapshot, PieceSnapshot};
pub use timer::LockTimer;
