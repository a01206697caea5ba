//! Mailbox board representation.
//!
//! `Board` owns every piece on the 8x8 grid and hands out a `PieceHandle` for
//! each one. Mutating primitives are crate-private: outside the crate a board
//! only changes through commands on the edit log or a new-game reset, so
//! every change is logged and invertible.

use log::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board_events::BoardEvent;
use crate::game_state::chess_rules::HOME_ROW_LAYOUT;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<PlacedPiece>; 8]; 8],
    next_handle: u32,
    bulk_depth: u32,
    events: Vec<BoardEvent>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [[None; 8]; 8],
            next_handle: 1,
            bulk_depth: 0,
            events: Vec::new(),
        }
    }
}

impl Board {
    /// Board with no pieces.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Board holding the standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        board.setup_initial_pieces();
        board.events.clear();
        board
    }

    /// Build a board from explicit placements, rejecting doubled squares.
    pub fn from_placements<I>(placements: I) -> Result<Self, ChessErrors>
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Self::new_empty();
        for (square, piece) in placements {
            if board.squares[square.row as usize][square.col as usize].is_some() {
                return Err(ChessErrors::SquareOccupied(square));
            }
            board.place_new(square, piece);
        }
        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.placed_at(square).map(|placed| &placed.piece)
    }

    #[inline]
    pub fn placed_at(&self, square: Square) -> Option<&PlacedPiece> {
        self.squares[square.row as usize][square.col as usize].as_ref()
    }

    #[inline]
    pub fn handle_at(&self, square: Square) -> Option<PieceHandle> {
        self.placed_at(square).map(|placed| placed.handle)
    }

    /// Squares holding a piece of the given colour and kind, row-major.
    pub fn find_pieces(&self, color: Color, kind: PieceKind) -> Vec<Square> {
        self.occupied()
            .filter(|(_, placed)| placed.piece.color == color && placed.piece.kind == kind)
            .map(|(square, _)| square)
            .collect()
    }

    /// Every occupied square with its piece, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, &PlacedPiece)> + '_ {
        Square::all().filter_map(move |square| self.placed_at(square).map(|p| (square, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.occupied().count()
    }

    /// Whether per-square notifications are currently suppressed.
    #[inline]
    pub fn in_bulk_update(&self) -> bool {
        self.bulk_depth > 0
    }

    /// Run `f` with per-square notifications suppressed, then queue a single
    /// `ModelReset` once the outermost bulk update finishes.
    pub(crate) fn bulk_update<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.bulk_depth += 1;
        let out = f(self);
        self.bulk_depth -= 1;
        if self.bulk_depth == 0 {
            self.events.push(BoardEvent::ModelReset);
        }
        out
    }

    /// Clear the board and lay out both armies.
    pub(crate) fn setup_initial_pieces(&mut self) {
        self.bulk_update(|board| {
            board.clear();
            for color in [Color::White, Color::Black] {
                let home = color.home_row();
                for (col, (kind, side)) in HOME_ROW_LAYOUT.iter().enumerate() {
                    board.place_new(
                        Square::new(home, col as u8),
                        Piece::with_side(color, *kind, *side),
                    );
                }
                let pawns = color.pawn_row();
                for col in 0..8 {
                    board.place_new(Square::new(pawns, col), Piece::new(color, PieceKind::Pawn));
                }
            }
        });
        debug!("initial pieces set up, {} on board", self.piece_count());
    }

    /// Drop every piece. Handles are never reused afterwards.
    pub(crate) fn clear(&mut self) {
        for square in Square::all() {
            if let Some(placed) = self.squares[square.row as usize][square.col as usize].take() {
                self.notify(BoardEvent::PieceRemoved {
                    handle: placed.handle,
                });
            }
        }
    }

    /// Put `piece` on an empty `square`.
    ///
    /// A `handle` restores a previously removed identity; `None` allocates a
    /// fresh one. Returns the handle the piece now carries.
    pub(crate) fn add_piece(
        &mut self,
        square: Square,
        piece: Piece,
        handle: Option<PieceHandle>,
    ) -> Result<PieceHandle, ChessErrors> {
        if self.placed_at(square).is_some() {
            return Err(ChessErrors::SquareOccupied(square));
        }
        let handle = match handle {
            Some(handle) => handle,
            None => self.allocate_handle(),
        };
        self.squares[square.row as usize][square.col as usize] = Some(PlacedPiece { handle, piece });
        self.notify(BoardEvent::PieceAdded {
            square,
            handle,
            piece,
        });
        Ok(handle)
    }

    pub(crate) fn remove_piece(&mut self, square: Square) -> Result<PlacedPiece, ChessErrors> {
        let placed = self.squares[square.row as usize][square.col as usize]
            .take()
            .ok_or(ChessErrors::EmptySquare(square))?;
        self.notify(BoardEvent::PieceRemoved {
            handle: placed.handle,
        });
        Ok(placed)
    }

    /// Transfer the piece on `from` to the empty square `to`.
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) -> Result<PieceHandle, ChessErrors> {
        if self.placed_at(from).is_none() {
            return Err(ChessErrors::EmptySquare(from));
        }
        if self.placed_at(to).is_some() {
            return Err(ChessErrors::SquareOccupied(to));
        }
        let placed = self.squares[from.row as usize][from.col as usize]
            .take()
            .ok_or(ChessErrors::EmptySquare(from))?;
        self.squares[to.row as usize][to.col as usize] = Some(placed);
        self.notify(BoardEvent::PieceMoved {
            square: to,
            handle: placed.handle,
        });
        Ok(placed.handle)
    }

    /// Queue a notification that is not tied to a single square.
    pub(crate) fn push_event(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Same pieces on the same squares, ignoring handles.
    pub fn same_position(&self, other: &Board) -> bool {
        Square::all().all(|square| self.piece_at(square) == other.piece_at(square))
    }

    /// Same pieces on the same squares carrying the same handles.
    pub fn same_identities(&self, other: &Board) -> bool {
        self.squares == other.squares
    }

    fn place_new(&mut self, square: Square, piece: Piece) {
        let handle = self.allocate_handle();
        self.squares[square.row as usize][square.col as usize] = Some(PlacedPiece { handle, piece });
        self.notify(BoardEvent::PieceAdded {
            square,
            handle,
            piece,
        });
    }

    fn allocate_handle(&mut self) -> PieceHandle {
        let handle = PieceHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn notify(&mut self, event: BoardEvent) {
        if !self.in_bulk_update() {
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::board_events::BoardEvent;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_has_thirty_two_pieces_with_origin_sides() {
        let board = Board::new_game();
        assert_eq!(board.piece_count(), 32);

        let queen_rook = board.piece_at(Square::new(0, 0)).expect("white QR present");
        assert_eq!(queen_rook.kind, PieceKind::Rook);
        assert_eq!(queen_rook.side, OriginSide::QueenSide);

        let king_knight = board.piece_at(Square::new(7, 6)).expect("black KKt present");
        assert_eq!(king_knight.kind, PieceKind::Knight);
        assert_eq!(king_knight.color, Color::Black);
        assert_eq!(king_knight.side, OriginSide::KingSide);

        let pawn = board.piece_at(Square::new(1, 5)).expect("white pawn present");
        assert_eq!(pawn.side, OriginSide::NoSide);
    }

    #[test]
    fn find_pieces_is_row_major() {
        let board = Board::new_game();
        assert_eq!(
            board.find_pieces(Color::White, PieceKind::Knight),
            vec![Square::new(0, 1), Square::new(0, 6)]
        );
        assert_eq!(board.find_pieces(Color::Black, PieceKind::Pawn).len(), 8);
        assert_eq!(
            board.find_pieces(Color::Black, PieceKind::King),
            vec![Square::new(7, 4)]
        );
    }

    #[test]
    fn add_and_remove_every_square() {
        let mut board = Board::new_empty();
        let piece = Piece::new(Color::White, PieceKind::Rook);
        for square in Square::all() {
            board.add_piece(square, piece, None).expect("empty square accepts add");
            assert!(board.piece_at(square).is_some());
            board.remove_piece(square).expect("occupied square allows remove");
            assert!(board.piece_at(square).is_none());
        }
    }

    #[test]
    fn move_transfers_identity() {
        let mut board = Board::new_game();
        let from = Square::new(1, 4);
        let to = Square::new(3, 4);
        let handle = board.handle_at(from).expect("pawn on e2");
        let moved = board.move_piece(from, to).expect("move should apply");
        assert_eq!(moved, handle);
        assert_eq!(board.handle_at(to), Some(handle));
        assert!(board.piece_at(from).is_none());
    }

    #[test]
    fn primitives_reject_broken_invariants() {
        let mut board = Board::new_game();
        assert!(matches!(
            board.move_piece(Square::new(3, 3), Square::new(4, 3)),
            Err(ChessErrors::EmptySquare(_))
        ));
        assert!(matches!(
            board.move_piece(Square::new(0, 0), Square::new(1, 0)),
            Err(ChessErrors::SquareOccupied(_))
        ));
        assert!(matches!(
            board.add_piece(Square::new(0, 4), Piece::new(Color::White, PieceKind::Queen), None),
            Err(ChessErrors::SquareOccupied(_))
        ));
        assert!(matches!(
            board.remove_piece(Square::new(4, 4)),
            Err(ChessErrors::EmptySquare(_))
        ));
    }

    #[test]
    fn bulk_update_batches_into_one_reset() {
        let mut board = Board::new_empty();
        board.setup_initial_pieces();
        assert_eq!(board.take_events(), vec![BoardEvent::ModelReset]);

        board
            .move_piece(Square::new(1, 0), Square::new(2, 0))
            .expect("pawn push");
        let events = board.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], BoardEvent::PieceMoved { .. }));
    }

    #[test]
    fn restored_handle_is_reused() {
        let mut board = Board::new_game();
        let square = Square::new(6, 3);
        let removed = board.remove_piece(square).expect("black pawn present");
        let restored = board
            .add_piece(square, removed.piece, Some(removed.handle))
            .expect("square is empty again");
        assert_eq!(restored, removed.handle);
        assert!(board.same_identities(&Board::new_game()));
    }
}
