//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`], converts mouse reports into
//! pointer pixels, and interprets pointer gestures (tap, swipe, drag) against
//! the [`crate::core::GameControls`] surface.

pub mod gesture;
pub mod map;
pub mod pointer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use gesture::{GestureOutcome, GestureTracker};
pub use map::{handle_key_event, settings_key, should_quit, SettingsKey};
pub use pointer::{is_click_in, CellRect, PointerEvent, PointerMapper};
