//! Canonical chess-rule constants.
//!
//! Starting layout of the home row and the fixed squares involved in
//! castling, shared by board setup and the notation parser.

use crate::game_state::chess_types::{OriginSide, PieceKind};

/// Column of the king at the start of a game.
pub const KING_COLUMN: u8 = 4;

/// Column of the queen at the start of a game.
pub const QUEEN_COLUMN: u8 = 3;

/// Home-row pieces in column order `0..8`, identical for both colours.
pub const HOME_ROW_LAYOUT: [(PieceKind, OriginSide); 8] = [
    (PieceKind::Rook, OriginSide::QueenSide),
    (PieceKind::Knight, OriginSide::QueenSide),
    (PieceKind::Bishop, OriginSide::QueenSide),
    (PieceKind::Queen, OriginSide::NoSide),
    (PieceKind::King, OriginSide::NoSide),
    (PieceKind::Bishop, OriginSide::KingSide),
    (PieceKind::Knight, OriginSide::KingSide),
    (PieceKind::Rook, OriginSide::KingSide),
];

/// Columns touched by one castling move, on the mover's home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingColumns {
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Extra square that must be empty (the queen's knight square), if any.
    pub must_be_empty: Option<u8>,
}

pub const KING_SIDE_CASTLING: CastlingColumns = CastlingColumns {
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    must_be_empty: None,
};

pub const QUEEN_SIDE_CASTLING: CastlingColumns = CastlingColumns {
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    must_be_empty: Some(1),
};

#[inline]
pub const fn castling_columns(king_side: bool) -> CastlingColumns {
    if king_side {
        KING_SIDE_CASTLING
    } else {
        QUEEN_SIDE_CASTLING
    }
}
