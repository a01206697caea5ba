//! Smallest board changes a parsed move is broken into.

use std::fmt;

use crate::game_state::chess_types::{Piece, Square};

/// One step of a parsed move.
///
/// A plain move is one `Move`; a capture is `Remove` then `Move`; promotion
/// appends `Remove` of the pawn and `Add` of the new piece; castling is two
/// `Move`s (king first). `Remove` records the piece it expects to take off
/// so the inverse can put it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveEdit {
    Add { square: Square, piece: Piece },
    Remove { square: Square, piece: Piece },
    Move { from: Square, to: Square },
}

impl PrimitiveEdit {
    /// The edit that exactly undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            PrimitiveEdit::Add { square, piece } => PrimitiveEdit::Remove { square, piece },
            PrimitiveEdit::Remove { square, piece } => PrimitiveEdit::Add { square, piece },
            PrimitiveEdit::Move { from, to } => PrimitiveEdit::Move { from: to, to: from },
        }
    }
}

impl fmt::Display for PrimitiveEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveEdit::Add { square, piece } => {
                write!(f, "add {:?} {} at {square}", piece.color, piece.kind.notation())
            }
            PrimitiveEdit::Remove { square, piece } => {
                write!(f, "remove {:?} {} at {square}", piece.color, piece.kind.notation())
            }
            PrimitiveEdit::Move { from, to } => write!(f, "move {from}-{to}"),
        }
    }
}
