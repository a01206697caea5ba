//! FEN piece-placement field to/from `Board`.
//!
//! Only the first FEN field is read: positions in this crate never carry
//! castling rights, en-passant targets or clocks. Rooks, knights and bishops
//! get their origin side from the half of the board they stand on, since
//! FEN does not record where a piece started.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;

pub fn parse_placement(placement: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = placement.trim().split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidPlacement(
            "Board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut placements = Vec::<(Square, Piece)>::new();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as u8;
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidPlacement(format!(
                        "Invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as u8;
                continue;
            }

            if col >= 8 {
                return Err(ChessErrors::InvalidPlacement(
                    "Board rank has too many files".to_owned(),
                ));
            }
            let (color, kind) = piece_from_fen_char(ch).ok_or_else(|| {
                ChessErrors::InvalidPlacement(format!("Invalid piece character '{ch}'"))
            })?;
            placements.push((
                Square::new(row, col),
                Piece::with_side(color, kind, side_for_column(kind, col)),
            ));
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidPlacement(
                "Board rank does not sum to 8 files".to_owned(),
            ));
        }
    }

    Board::from_placements(placements)
}

pub fn generate_placement(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..8u8).rev() {
        let mut empty = 0;
        for col in 0..8u8 {
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if row > 0 {
            out.push('/');
        }
    }
    out
}

fn side_for_column(kind: PieceKind, col: u8) -> OriginSide {
    match kind {
        PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop if col >= 4 => OriginSide::KingSide,
        PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop => OriginSide::QueenSide,
        _ => OriginSide::NoSide,
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}

fn piece_to_fen_char(piece: &Piece) -> char {
    let ch = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    if piece.is_white() {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_placement, parse_placement};
    use crate::game_state::chess_types::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_placement_matches_new_game() {
        let board = parse_placement(START).expect("start placement should parse");
        assert!(board.same_position(&Board::new_game()));
        assert_eq!(generate_placement(&Board::new_game()), START);
    }

    #[test]
    fn origin_side_follows_board_half() {
        let board = parse_placement("8/8/8/8/8/8/8/1R3N2").expect("placement should parse");
        let rook = board.piece_at(Square::new(0, 1)).expect("rook on b1");
        assert_eq!(rook.side, OriginSide::QueenSide);
        let knight = board.piece_at(Square::new(0, 5)).expect("knight on f1");
        assert_eq!(knight.side, OriginSide::KingSide);
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert!(parse_placement("8/8/8").is_err());
        assert!(parse_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(parse_placement("8/8/8/8/8/8/8/7").is_err());
        assert!(parse_placement("8/8/8/8/8/8/8/7x").is_err());
    }
}
