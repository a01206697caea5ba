//! Piece and column names of Descriptive notation.
//!
//! Columns are named after the piece that starts on them ("QR", "KB", ...),
//! and ranks are counted from the mover's own side of the board. These
//! helpers convert between those names and board coordinates.

use crate::game_state::chess_rules::{KING_COLUMN, QUEEN_COLUMN};
use crate::game_state::chess_types::{Color, OriginSide, PieceKind, Square};

/// Column names from White's left to right.
pub const COLUMN_NAMES: [&str; 8] = ["QR", "QKt", "QB", "Q", "K", "KB", "KKt", "KR"];

/// Parse a bare piece name: K, Q, B, R, P, Kt or N, any case.
pub fn parse_piece_name(text: &str) -> Option<PieceKind> {
    match text.to_ascii_uppercase().as_str() {
        "K" => Some(PieceKind::King),
        "Q" => Some(PieceKind::Queen),
        "B" => Some(PieceKind::Bishop),
        "KT" | "N" => Some(PieceKind::Knight),
        "R" => Some(PieceKind::Rook),
        "P" => Some(PieceKind::Pawn),
        _ => None,
    }
}

/// Parse a piece name with an optional side prefix, like "B", "KB" or "QKt".
///
/// A leading K or Q followed by another letter is a side prefix, except for
/// the "Kt" of a knight. Kings and queens cannot carry a side prefix.
pub fn parse_piece_name_and_side(text: &str) -> Option<(PieceKind, OriginSide)> {
    let upper = text.to_ascii_uppercase();
    let bytes = upper.as_bytes();

    let mut side = OriginSide::NoSide;
    let mut name = upper.as_str();
    if bytes.len() > 1 && bytes[1].is_ascii_alphabetic() {
        if bytes[0] == b'Q' {
            side = OriginSide::QueenSide;
            name = &upper[1..];
        } else if bytes[0] == b'K' && bytes[1] != b'T' {
            side = OriginSide::KingSide;
            name = &upper[1..];
        }
    }

    let kind = parse_piece_name(name)?;
    if side != OriginSide::NoSide && matches!(kind, PieceKind::King | PieceKind::Queen) {
        return None;
    }
    Some((kind, side))
}

/// Columns a piece-and-side name can refer to, king's side first.
///
/// Pawns name no column and yield an empty list.
pub fn columns_for_piece_and_side(kind: PieceKind, side: OriginSide) -> Vec<u8> {
    let pair = |king_side: u8, queen_side: u8| {
        let mut cols = Vec::with_capacity(2);
        if side != OriginSide::QueenSide {
            cols.push(king_side);
        }
        if side != OriginSide::KingSide {
            cols.push(queen_side);
        }
        cols
    };
    match kind {
        PieceKind::King => vec![KING_COLUMN],
        PieceKind::Queen => vec![QUEEN_COLUMN],
        PieceKind::Bishop => pair(5, 2),
        PieceKind::Knight => pair(6, 1),
        PieceKind::Rook => pair(7, 0),
        PieceKind::Pawn => Vec::new(),
    }
}

/// Board row for a rank number as seen by `player` (1 = own home rank).
pub fn rank_to_row(rank: u8, player: Color) -> Option<u8> {
    if !(1..=8).contains(&rank) {
        return None;
    }
    let row = rank - 1;
    Some(match player {
        Color::White => row,
        Color::Black => 7 - row,
    })
}

/// Descriptive name of a square from `player`'s side, e.g. "QB4".
pub fn square_to_descriptive(square: Square, player: Color) -> String {
    let rank = match player {
        Color::White => square.row + 1,
        Color::Black => 8 - square.row,
    };
    format!("{}{}", COLUMN_NAMES[square.col as usize], rank)
}
