//! A parsed move as an invertible command.

use log::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board_events::BoardEvent;
use crate::game_state::chess_types::*;
use crate::history::move_history::MoveHistory;
use crate::move_generation::legal_move_checks::check_for_check;
use crate::notation::primitive_edit::PrimitiveEdit;

/// One move: who made it, the text as entered and the edits that make it.
///
/// The handles of pieces the edits add or remove are recorded the first time
/// the command is applied, so undo and redo put back the same identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    player: Color,
    text: String,
    edits: Vec<PrimitiveEdit>,
    handles: Vec<Option<PieceHandle>>,
}

impl MoveCommand {
    pub fn new(player: Color, text: impl Into<String>, edits: Vec<PrimitiveEdit>) -> Self {
        let handles = vec![None; edits.len()];
        Self {
            player,
            text: text.into(),
            edits,
            handles,
        }
    }

    /// Apply the edits forward and record the move in the ledger.
    pub(crate) fn redo(&mut self, board: &mut Board, history: &mut MoveHistory) -> Result<(), ChessErrors> {
        debug!("apply {:?} {}", self.player, self.text);
        for (edit, handle) in self.edits.iter().zip(self.handles.iter_mut()) {
            apply_edit(board, *edit, handle)?;
        }
        history.append_move(self.player, &self.text)?;
        board.push_event(BoardEvent::LastMoveMade(self.text.clone()));
        detect_check(board, self.player);
        Ok(())
    }

    /// Take the move back out of the ledger and reverse its edits, then look
    /// for check by the same side on the restored board.
    pub(crate) fn undo(&mut self, board: &mut Board, history: &mut MoveHistory) -> Result<(), ChessErrors> {
        debug!("invert {:?} {}", self.player, self.text);
        history.remove_last_move()?;
        board.push_event(BoardEvent::LastMoveMade(
            history.text_of_last_move_made().to_owned(),
        ));
        for (edit, handle) in self.edits.iter().zip(self.handles.iter_mut()).rev() {
            apply_edit(board, edit.inverse(), handle)?;
        }
        detect_check(board, self.player);
        Ok(())
    }
}

fn apply_edit(board: &mut Board, edit: PrimitiveEdit, handle: &mut Option<PieceHandle>) -> Result<(), ChessErrors> {
    match edit {
        PrimitiveEdit::Add { square, piece } => {
            *handle = Some(board.add_piece(square, piece, *handle)?);
        }
        PrimitiveEdit::Remove { square, piece } => {
            if board.piece_at(square) != Some(&piece) {
                return Err(ChessErrors::UnexpectedPiece(square));
            }
            *handle = Some(board.remove_piece(square)?.handle);
        }
        PrimitiveEdit::Move { from, to } => {
            board.move_piece(from, to)?;
        }
    }
    Ok(())
}

fn detect_check(board: &mut Board, attacker: Color) {
    if let Some((attacker, king)) = check_for_check(board, attacker) {
        debug!("check from {attacker} on king at {king}");
        board.push_event(BoardEvent::CheckDetected { attacker, king });
    }
}
