//! Geometric legality predicates over a board.
//!
//! These answer "could this piece, standing here, move or capture there?"
//! without knowing whose turn it is and without looking at the safety of the
//! mover's own king. Castling is not a king move here; the parser builds it
//! as a compound move.

use crate::game_state::chess_types::*;

/// Whether any square strictly between `from` and `to` is occupied.
///
/// `from` and `to` must lie on a common rank, file or diagonal.
pub fn obstructed(board: &Board, from: Square, to: Square) -> bool {
    let col_distance = to.col as i32 - from.col as i32;
    let row_distance = to.row as i32 - from.row as i32;
    debug_assert!(
        col_distance == 0 || row_distance == 0 || col_distance.abs() == row_distance.abs()
    );

    let col_delta = col_distance.signum();
    let row_delta = row_distance.signum();
    let steps = col_distance.abs().max(row_distance.abs());

    (1..steps).any(|step| {
        Square::try_new(
            from.row as i32 + row_delta * step,
            from.col as i32 + col_delta * step,
        )
        .is_some_and(|square| board.piece_at(square).is_some())
    })
}

/// Whether `piece`, if it stood on `from` (it may or may not), could reach `to`.
///
/// With `capture` the destination must hold an opposing piece. With
/// `en_passant` as well, `to` is the square of the pawn being captured, not
/// the square the capturing pawn ends up on.
pub fn could_move_from_to(
    board: &Board,
    piece: &Piece,
    from: Square,
    to: Square,
    capture: bool,
    en_passant: bool,
) -> bool {
    // Distances from the owner's point of view.
    let col_distance = to.col as i32 - from.col as i32;
    let mut row_distance = to.row as i32 - from.row as i32;
    if piece.color == Color::Black {
        row_distance = -row_distance;
    }
    if col_distance == 0 && row_distance == 0 {
        return false;
    }

    let target = board.piece_at(to);
    if capture {
        match target {
            Some(target) if target.color != piece.color => {
                if en_passant && (piece.kind != PieceKind::Pawn || target.kind != PieceKind::Pawn) {
                    return false;
                }
            }
            _ => return false,
        }
    } else if target.is_some() {
        return false;
    }

    let straight = col_distance == 0 || row_distance == 0;
    let diagonal = col_distance.abs() == row_distance.abs();

    match piece.kind {
        PieceKind::King => col_distance.abs() <= 1 && row_distance.abs() <= 1,
        PieceKind::Queen => (straight || diagonal) && !obstructed(board, from, to),
        PieceKind::Rook => straight && !obstructed(board, from, to),
        PieceKind::Bishop => diagonal && !obstructed(board, from, to),
        PieceKind::Knight => {
            (col_distance.abs() == 2 && row_distance.abs() == 1)
                || (col_distance.abs() == 1 && row_distance.abs() == 2)
        }
        PieceKind::Pawn => {
            if capture {
                if col_distance.abs() != 1 {
                    return false;
                }
                match target {
                    Some(captured) if en_passant => en_passant_geometry(board, captured, to, row_distance),
                    _ => row_distance == 1,
                }
            } else {
                if col_distance != 0 {
                    return false;
                }
                match row_distance {
                    1 => true,
                    2 => from.row == piece.color.pawn_row() && !obstructed(board, from, to),
                    _ => false,
                }
            }
        }
    }
}

/// Sideways step onto a pawn that has just made its double advance.
fn en_passant_geometry(board: &Board, captured: &Piece, at: Square, row_distance: i32) -> bool {
    if row_distance != 0 {
        return false;
    }
    // Captured pawn sits on its own fourth rank with both squares it
    // skipped still empty.
    let (fourth, skipped, start) = if captured.is_white() { (3, 2, 1) } else { (4, 5, 6) };
    at.row == fourth
        && board.piece_at(Square::new(skipped, at.col)).is_none()
        && board.piece_at(Square::new(start, at.col)).is_none()
}

/// Same as `could_move_from_to` for whatever currently stands on `from`.
pub fn could_move_from(board: &Board, from: Square, to: Square, capture: bool, en_passant: bool) -> bool {
    board
        .piece_at(from)
        .is_some_and(|piece| could_move_from_to(board, piece, from, to, capture, en_passant))
}

/// Square of `color`'s king, `None` unless there is exactly one.
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    match board.find_pieces(color, PieceKind::King).as_slice() {
        [square] => Some(*square),
        _ => None,
    }
}

/// First `attacker` piece (row-major) able to capture the opposing king.
///
/// Returns `(attacker square, king square)`.
pub fn check_for_check(board: &Board, attacker: Color) -> Option<(Square, Square)> {
    let king = king_square(board, attacker.opposite())?;
    board
        .occupied()
        .filter(|(_, placed)| placed.piece.color == attacker)
        .find(|(square, placed)| could_move_from_to(board, &placed.piece, *square, king, true, false))
        .map(|(square, _)| (square, king))
}
