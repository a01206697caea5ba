//! Descriptive-notation move parser.
//!
//! Turns text such as `P-K4`, `KKt-B3`, `QxR(B7)ch`, `PxPep`, `P-R8=Q` or
//! `O-O-O` into the ordered primitive edits that make the move, resolving the
//! notation's built-in ambiguity ("B3" is either bishop's file) against the
//! current board. The parser only reads the board.
//!
//! Resolution works on candidate lists: every square holding a piece that
//! matches the left-hand side, crossed with every square matching the
//! right-hand side. A pair survives when the legality checks accept it and,
//! when the text claims check, when the moved piece would attack the opposing
//! king from its new square. Exactly one survivor is required.

use log::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{castling_columns, KING_COLUMN};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{could_move_from_to, king_square};
use crate::notation::descriptive_names::{
    columns_for_piece_and_side, parse_piece_name, parse_piece_name_and_side, rank_to_row,
};
use crate::notation::primitive_edit::PrimitiveEdit;

/// Parse `text` as a move by `player` on `board`.
pub fn parse_descriptive(
    board: &Board,
    player: Color,
    text: &str,
) -> Result<Vec<PrimitiveEdit>, ChessErrors> {
    DescriptiveParser::new(board, player).parse(text)
}

/// Remove every whitespace character, as move text is entered loosely.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub struct DescriptiveParser<'a> {
    board: &'a Board,
    player: Color,
}

/// A piece reference split around its name: `pre` + name + `post`, as in
/// "K" + "Kt" + "" or "" + "R" + "(B1)".
#[derive(Debug)]
struct PieceSpecifier {
    pre: String,
    kind: PieceKind,
    post: String,
}

/// Parsed `<column><rank>` text where either part may be missing.
#[derive(Debug)]
struct SquareSpecifier {
    row: Option<u8>,
    cols: Vec<u8>,
}

impl<'a> DescriptiveParser<'a> {
    pub fn new(board: &'a Board, player: Color) -> Self {
        Self { board, player }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<PrimitiveEdit>, ChessErrors> {
        let text = strip_whitespace(text);
        if text.is_empty() {
            return Err(ChessErrors::EmptyMoveText);
        }

        let tokens: Vec<&str> = text.split('-').collect();
        if is_castling_token(tokens[0]) {
            return self.parse_castling(&text, &tokens);
        }
        if tokens.len() == 2 {
            return self.parse_move(&text, tokens[0], tokens[1]);
        }
        if tokens.len() > 1 {
            return Err(ChessErrors::UnrecognisedMoveType(text));
        }

        let tokens: Vec<&str> = text.split(|c: char| c == 'x' || c == 'X').collect();
        if tokens.len() == 2 {
            return self.parse_capture(&text, tokens[0], tokens[1]);
        }
        if tokens.len() > 1 {
            return Err(ChessErrors::UnrecognisedCaptureType(text));
        }

        Err(ChessErrors::UnrecognisedMove(text))
    }

    fn parse_castling(&self, text: &str, tokens: &[&str]) -> Result<Vec<PrimitiveEdit>, ChessErrors> {
        if !(2..=3).contains(&tokens.len()) || !tokens.iter().all(|token| is_castling_token(token)) {
            return Err(ChessErrors::UnrecognisedCastling(text.to_owned()));
        }
        let king_side = tokens.len() == 2;
        let columns = castling_columns(king_side);
        let row = self.player.home_row();

        let king_from = Square::new(row, KING_COLUMN);
        let king_to = Square::new(row, columns.king_to);
        let rook_from = Square::new(row, columns.rook_from);
        let rook_to = Square::new(row, columns.rook_to);

        if !self.holds(king_from, PieceKind::King) {
            return Err(ChessErrors::CastlingKingMissing);
        }
        if !self.holds(rook_from, PieceKind::Rook) {
            return Err(ChessErrors::CastlingRookMissing);
        }

        let extra_occupied = columns
            .must_be_empty
            .is_some_and(|col| self.board.piece_at(Square::new(row, col)).is_some());
        if self.board.piece_at(king_to).is_some()
            || self.board.piece_at(rook_to).is_some()
            || extra_occupied
        {
            return Err(ChessErrors::CastlingObstructed);
        }

        Ok(vec![
            PrimitiveEdit::Move {
                from: king_from,
                to: king_to,
            },
            PrimitiveEdit::Move {
                from: rook_from,
                to: rook_to,
            },
        ])
    }

    /// A move like "P-K4" or "R(QR1)-Q1ch".
    fn parse_move(&self, text: &str, lhs: &str, rhs: &str) -> Result<Vec<PrimitiveEdit>, ChessErrors> {
        let squares_from = self.parse_piece_move_from(lhs)?;

        let (body, check) = strip_check_qualifier(rhs);
        let (body, promotion) = parse_promotion_qualifier(body)?;
        let squares_to = self
            .parse_move_to(body)
            .ok_or_else(|| ChessErrors::UnrecognisedSquare(rhs.to_owned()))?;

        let pairs = self.resolve_squares_from_to(&squares_from, &squares_to, false, false, check);
        let (from, to) = match pairs.as_slice() {
            [pair] => *pair,
            [] => return Err(ChessErrors::NoLegalMove(text.to_owned())),
            _ => return Err(ChessErrors::AmbiguousMove(text.to_owned())),
        };

        let piece = *self.board.piece_at(from).ok_or(ChessErrors::EmptySquare(from))?;
        if self.board.piece_at(to).is_some() {
            return Err(ChessErrors::DestinationOccupied(text.to_owned()));
        }
        check_promotion_legality(text, promotion, &piece, to)?;

        let mut edits = vec![PrimitiveEdit::Move { from, to }];
        if let Some(kind) = promotion {
            append_promotion_edits(&piece, kind, to, &mut edits);
        }
        Ok(edits)
    }

    /// A capture like "PxP", "KtxQBP" or "PxPep".
    fn parse_capture(&self, text: &str, lhs: &str, rhs: &str) -> Result<Vec<PrimitiveEdit>, ChessErrors> {
        let squares_from = self.parse_piece_move_from(lhs)?;

        let (body, check) = strip_check_qualifier(rhs);
        let (body, promotion) = parse_promotion_qualifier(body)?;
        let (squares_to, en_passant) = self.parse_capture_at(body)?;

        let pairs = self.resolve_squares_from_to(&squares_from, &squares_to, true, en_passant, check);
        let (from, to) = match pairs.as_slice() {
            [pair] => *pair,
            [] => return Err(ChessErrors::NoLegalCapture(text.to_owned())),
            _ => return Err(ChessErrors::AmbiguousCapture(text.to_owned())),
        };

        let piece = *self.board.piece_at(from).ok_or(ChessErrors::EmptySquare(from))?;
        let captured = match self.board.piece_at(to) {
            Some(captured) if captured.color != self.player => *captured,
            _ => return Err(ChessErrors::CaptureSquareNotOpposing(text.to_owned())),
        };
        check_promotion_legality(text, promotion, &piece, to)?;

        let mut edits = vec![PrimitiveEdit::Remove {
            square: to,
            piece: captured,
        }];
        // En passant resolves against the captured pawn's square; the capturer
        // lands one row further on in that column.
        let landing = if en_passant {
            Square::new(if piece.is_white() { 5 } else { 2 }, to.col)
        } else {
            to
        };
        edits.push(PrimitiveEdit::Move { from, to: landing });
        if let Some(kind) = promotion {
            append_promotion_edits(&piece, kind, landing, &mut edits);
        }
        Ok(edits)
    }

    /// Squares of the mover's pieces matching a piece specifier.
    fn parse_piece_move_from(&self, lhs: &str) -> Result<Vec<Square>, ChessErrors> {
        let spec = parse_full_piece_specifier(lhs)
            .ok_or_else(|| ChessErrors::UnrecognisedPiece(lhs.to_owned()))?;
        let squares = self.find_qualified(self.player, &spec)?;
        if squares.is_empty() {
            return Err(ChessErrors::PieceNotFound(lhs.to_owned()));
        }
        Ok(squares)
    }

    /// Squares of the opponent's pieces matching a capture target, plus
    /// whether the target carried an `ep` marker.
    fn parse_capture_at(&self, rhs: &str) -> Result<(Vec<Square>, bool), ChessErrors> {
        let (body, en_passant) = strip_en_passant_qualifier(rhs);
        let spec = parse_full_piece_specifier(body)
            .ok_or_else(|| ChessErrors::UnrecognisedPiece(rhs.to_owned()))?;
        let squares = self.find_qualified(self.player.opposite(), &spec)?;
        if squares.is_empty() {
            return Err(ChessErrors::CaptureTargetNotFound(rhs.to_owned()));
        }
        Ok((squares, en_passant))
    }

    fn find_qualified(&self, color: Color, spec: &PieceSpecifier) -> Result<Vec<Square>, ChessErrors> {
        let mut squares = self.board.find_pieces(color, spec.kind);
        if squares.is_empty() {
            return Ok(squares);
        }
        if !spec.pre.is_empty() {
            self.apply_pre_qualifier(&spec.pre, spec.kind, &mut squares)?;
        }
        if !spec.post.is_empty() {
            self.apply_post_qualifier(&spec.post, &mut squares)?;
        }
        Ok(squares)
    }

    /// Narrow candidates by a leading qualifier such as the "K" of "KR" or
    /// the "QB" of "QBP".
    ///
    /// For pawns the qualifier names the column the pawn stands on now. For
    /// rooks, knights and bishops it names the side the piece started on,
    /// wherever it has since moved.
    fn apply_pre_qualifier(
        &self,
        qualifier: &str,
        kind: PieceKind,
        squares: &mut Vec<Square>,
    ) -> Result<(), ChessErrors> {
        let unrecognised = || ChessErrors::UnrecognisedQualifier(qualifier.to_owned());
        let (column_name, side) = parse_piece_name_and_side(qualifier).ok_or_else(unrecognised)?;

        if kind == PieceKind::Pawn {
            let cols = columns_for_piece_and_side(column_name, side);
            if cols.is_empty() {
                return Err(unrecognised());
            }
            squares.retain(|square| cols.contains(&square.col));
            return Ok(());
        }

        if matches!(kind, PieceKind::King | PieceKind::Queen) || side != OriginSide::NoSide {
            return Err(unrecognised());
        }
        let side = match column_name {
            PieceKind::King => OriginSide::KingSide,
            PieceKind::Queen => OriginSide::QueenSide,
            _ => return Err(unrecognised()),
        };
        squares.retain(|square| {
            self.board
                .piece_at(*square)
                .map_or(true, |piece| piece.side == side)
        });
        Ok(())
    }

    /// Narrow candidates by a trailing square qualifier such as "(B1)".
    fn apply_post_qualifier(&self, qualifier: &str, squares: &mut Vec<Square>) -> Result<(), ChessErrors> {
        let unrecognised = || ChessErrors::UnrecognisedQualifier(qualifier.to_owned());
        let inner = qualifier
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .filter(|inner| !inner.is_empty())
            .ok_or_else(unrecognised)?;
        let spec = self.parse_square_specifier(inner).ok_or_else(unrecognised)?;

        squares.retain(|square| {
            spec.row.map_or(true, |row| square.row == row)
                && (spec.cols.is_empty() || spec.cols.contains(&square.col))
        });
        Ok(())
    }

    /// Parse "K4", "QB", "7" or "KKt7"; ranks are read from the mover's side.
    fn parse_square_specifier(&self, specifier: &str) -> Option<SquareSpecifier> {
        let mut rest = specifier;
        let mut row = None;
        if let Some(last) = rest.chars().last().filter(char::is_ascii_digit) {
            rest = &rest[..rest.len() - 1];
            row = Some(rank_to_row(last as u8 - b'0', self.player)?);
        }

        let mut cols = Vec::new();
        if !rest.is_empty() {
            let (kind, side) = parse_piece_name_and_side(rest)?;
            if kind == PieceKind::Pawn {
                return None;
            }
            cols = columns_for_piece_and_side(kind, side);
        }

        Some(SquareSpecifier { row, cols })
    }

    /// Destination squares for a move; both rank and column are required.
    fn parse_move_to(&self, rhs: &str) -> Option<Vec<Square>> {
        let spec = self.parse_square_specifier(rhs)?;
        let row = spec.row?;
        if spec.cols.is_empty() {
            return None;
        }
        Some(spec.cols.iter().map(|col| Square::new(row, *col)).collect())
    }

    fn resolve_squares_from_to(
        &self,
        squares_from: &[Square],
        squares_to: &[Square],
        capture: bool,
        en_passant: bool,
        check: bool,
    ) -> Vec<(Square, Square)> {
        let opposing_king = if check {
            king_square(self.board, self.player.opposite())
        } else {
            None
        };

        let mut possibles = Vec::new();
        for &from in squares_from {
            let Some(piece) = self.board.piece_at(from) else {
                continue;
            };
            for &to in squares_to {
                if !could_move_from_to(self.board, piece, from, to, capture, en_passant) {
                    continue;
                }
                if let Some(king) = opposing_king {
                    if !could_move_from_to(self.board, piece, to, king, true, false) {
                        continue;
                    }
                }
                possibles.push((from, to));
            }
        }

        debug!(
            "resolved {} x {} candidates to {:?} (capture={capture}, ep={en_passant}, check={check})",
            squares_from.len(),
            squares_to.len(),
            possibles
        );
        possibles
    }

    fn holds(&self, square: Square, kind: PieceKind) -> bool {
        self.board
            .piece_at(square)
            .is_some_and(|piece| piece.kind == kind && piece.color == self.player)
    }
}

fn is_castling_token(token: &str) -> bool {
    token.eq_ignore_ascii_case("O") || token == "0"
}

/// Split a piece reference into qualifier, piece name and square qualifier.
///
/// The piece is the last name before any '('; everything before it is the
/// pre-qualifier, so "KKtP" is a pawn qualified by "KKt".
fn parse_full_piece_specifier(text: &str) -> Option<PieceSpecifier> {
    let chars: Vec<char> = text.chars().collect();
    let mut pre = String::new();
    let mut name = String::new();
    let mut post = String::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '(' {
            post = chars[i..].iter().collect();
            break;
        }
        pre.push_str(&name);
        name = ch.to_string();
        if ch.to_ascii_uppercase() == 'K' && chars.get(i + 1).is_some_and(|next| next.eq_ignore_ascii_case(&'t')) {
            i += 1;
            name.push(chars[i]);
        }
        i += 1;
    }

    let kind = parse_piece_name(&name)?;
    Some(PieceSpecifier { pre, kind, post })
}

/// Strip a trailing "ch", "ch." or "+".
fn strip_check_qualifier(rhs: &str) -> (&str, bool) {
    let lower = rhs.to_ascii_lowercase();
    for suffix in ["+", "ch.", "ch"] {
        if lower.ends_with(suffix) {
            return (&rhs[..rhs.len() - suffix.len()], true);
        }
    }
    (rhs, false)
}

/// Strip a trailing "ep", "e.p.", "e.p" or "ep.".
fn strip_en_passant_qualifier(rhs: &str) -> (&str, bool) {
    let lower = rhs.to_ascii_lowercase();
    for suffix in ["e.p.", "e.p", "ep.", "ep"] {
        if lower.ends_with(suffix) {
            return (&rhs[..rhs.len() - suffix.len()], true);
        }
    }
    (rhs, false)
}

/// Strip a trailing "=X" and return the piece to promote to.
fn parse_promotion_qualifier(rhs: &str) -> Result<(&str, Option<PieceKind>), ChessErrors> {
    let Some(at) = rhs.rfind('=') else {
        return Ok((rhs, None));
    };
    let kind = parse_piece_name(&rhs[at + 1..])
        .ok_or_else(|| ChessErrors::UnrecognisedPromotion(rhs.to_owned()))?;
    if matches!(kind, PieceKind::Pawn | PieceKind::King) {
        return Err(ChessErrors::IllegalPromotionPiece(rhs.to_owned()));
    }
    Ok((&rhs[..at], Some(kind)))
}

/// Promotion is only for pawns, only on the last rank, and required there.
fn check_promotion_legality(
    text: &str,
    promotion: Option<PieceKind>,
    piece: &Piece,
    to: Square,
) -> Result<(), ChessErrors> {
    let on_last_row = to.row == piece.color.last_row();
    match promotion {
        Some(_) if piece.kind != PieceKind::Pawn => {
            Err(ChessErrors::PromotedPieceNotPawn(text.to_owned()))
        }
        Some(_) if !on_last_row => Err(ChessErrors::PromotionNotOnLastRank(text.to_owned())),
        None if piece.kind == PieceKind::Pawn && on_last_row => {
            Err(ChessErrors::MissingPromotion(text.to_owned()))
        }
        _ => Ok(()),
    }
}

fn append_promotion_edits(pawn: &Piece, kind: PieceKind, square: Square, edits: &mut Vec<PrimitiveEdit>) {
    edits.push(PrimitiveEdit::Remove {
        square,
        piece: *pawn,
    });
    edits.push(PrimitiveEdit::Add {
        square,
        piece: Piece::new(pawn.color, kind),
    });
}
