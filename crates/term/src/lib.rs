//! Terminal front end.
//!
//! A small, game-oriented rendering layer. It avoids widget/layout libraries
//! and instead renders into a simple framebuffer that is diffed and flushed
//! to the terminal.
//!
//! - [`game_view`]: pure snapshot-to-framebuffer mapping plus screen layout
//! - [`renderer`]: terminal setup and diff flushing
//! - [`theme`]: colour themes
//! - [`audio`]: terminal bell sound cues

pub mod audio;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use audio::BellAudio;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Rect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{Theme, THEMES};
