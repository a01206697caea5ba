//! Terminal-oriented Unicode board renderer.
//!
//! Columns are labelled with their Descriptive names from White's side and
//! rows with White's rank numbers, row 7 at the top.

use crate::game_state::chess_types::*;
use crate::notation::descriptive_names::COLUMN_NAMES;

/// Render the board to a Unicode string for terminal output.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let header = column_header();

    out.push_str(&header);
    out.push('\n');

    for row in (0..8u8).rev() {
        out.push(char::from(b'1' + row));
        out.push(' ');

        for col in 0..8u8 {
            let cell = match board.piece_at(Square::new(row, col)) {
                Some(piece) => piece_to_unicode(piece.color, piece.kind),
                None => '·',
            };
            out.push_str(&format!("{cell:^4}"));
        }

        out.push(' ');
        out.push(char::from(b'1' + row));
        out.push('\n');
    }

    out.push_str(&header);

    out
}

fn column_header() -> String {
    let mut header = String::from("  ");
    for name in COLUMN_NAMES {
        header.push_str(&format!("{name:^4}"));
    }
    header.trim_end().to_owned()
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::chess_types::Board;

    #[test]
    fn starting_board_renders_both_armies() {
        let rendered = render_board(&Board::new_game());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].contains("QKt"));
        assert!(lines[1].starts_with("8 "));
        assert!(lines[1].contains('♚'));
        assert!(lines[8].starts_with("1 "));
        assert!(lines[8].contains('♔'));
        assert_eq!(lines[4].matches('·').count(), 8);
    }
}
