//! Control surface used by input mapping
//!
//! Input handlers (keyboard mapping, pointer gestures) drive the game through
//! this trait instead of the concrete session, so they can be tested against
//! a scripted double.

use crate::piece::Piece;
use crate::session::GameSession;
use crate::types::GamePhase;

pub trait GameControls {
    fn phase(&self) -> GamePhase;
    fn current_piece(&self) -> Option<&Piece>;
    fn move_left(&mut self) -> bool;
    fn move_right(&mut self) -> bool;
    fn rotate(&mut self) -> bool;
    fn soft_drop(&mut self) -> bool;
    fn hard_drop(&mut self) -> bool;
    fn swap(&mut self) -> bool;
    fn pause(&mut self) -> bool;
}

impl GameControls for GameSession {
    fn phase(&self) -> GamePhase {
        GameSession::phase(self)
    }

    fn current_piece(&self) -> Option<&Piece> {
        GameSession::current_piece(self)
    }

    fn move_left(&mut self) -> bool {
        GameSession::move_left(self)
    }

    fn move_right(&mut self) -> bool {
        GameSession::move_right(self)
    }

    fn rotate(&mut self) -> bool {
        GameSession::rotate(self)
    }

    fn soft_drop(&mut self) -> bool {
        GameSession::soft_drop(self)
    }

    fn hard_drop(&mut self) -> bool {
        GameSession::hard_drop(self)
    }

    fn swap(&mut self) -> bool {
        GameSession::swap(self)
    }

    fn pause(&mut self) -> bool {
        GameSession::pause(self)
    }
}
