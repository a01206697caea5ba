//! Core value types shared by the board, the legality checks and the parser.
//!
//! Squares are addressed as `(row, col)` with row 0 being White's home rank
//! and col 0 the queen's-rook file. Pieces are plain values; their identity on
//! the board is carried separately by a `PieceHandle`.

use std::fmt;

pub use crate::game_state::board::Board;

/// Side owning a piece, and side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this side's king and pieces at the start of a game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row holding this side's pawns at the start of a game.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn last_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

/// Piece kind (colour is represented separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Descriptive-notation name, as written in move text.
    pub const fn notation(self) -> &'static str {
        match self {
            PieceKind::King => "K",
            PieceKind::Queen => "Q",
            PieceKind::Rook => "R",
            PieceKind::Bishop => "B",
            PieceKind::Knight => "Kt",
            PieceKind::Pawn => "P",
        }
    }
}

/// Board half a rook, knight or bishop started the game on.
///
/// Fixed when the piece is created and never recomputed from where the piece
/// currently stands. Kings, queens, pawns and promoted pieces carry `NoSide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginSide {
    NoSide,
    KingSide,
    QueenSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub side: OriginSide,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            side: OriginSide::NoSide,
        }
    }

    #[inline]
    pub const fn with_side(color: Color, kind: PieceKind, side: OriginSide) -> Self {
        Self { color, kind, side }
    }

    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self.color, Color::White)
    }
}

/// Stable identity of a piece while it is on the board.
///
/// Handed out with every add/move/remove notification so a presentation
/// layer can correlate its own sprites with board entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceHandle(pub(crate) u32);

impl fmt::Display for PieceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece together with its board identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub handle: PieceHandle,
    pub piece: Piece,
}

/// Board square, `row` and `col` both in `0..8`.
///
/// Only built through `new` or `try_new`, so every square indexes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl Square {
    /// Panics when either coordinate is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square off the board");
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Build a square from signed coordinates, `None` when off the board.
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares in row-major order, starting at White's queen's rook.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.col),
            char::from(b'1' + self.row)
        )
    }
}
