//! Notifications queued for presentation collaborators.
//!
//! The board model never calls out to a UI. Instead every observable change
//! is pushed as a `BoardEvent` and the owner drains the queue after each
//! entry point returns.

use crate::game_state::chess_types::{Piece, PieceHandle, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    PieceAdded {
        square: Square,
        handle: PieceHandle,
        piece: Piece,
    },
    PieceRemoved {
        handle: PieceHandle,
    },
    PieceMoved {
        square: Square,
        handle: PieceHandle,
    },
    /// Emitted once at the end of a bulk update in place of per-square events.
    ModelReset,
    StartedNewGame,
    /// Text of the move now considered "last made" (empty at game start).
    LastMoveMade(String),
    CheckDetected {
        attacker: Square,
        king: Square,
    },
    ParserMessage(String),
    CleanChanged(bool),
}
