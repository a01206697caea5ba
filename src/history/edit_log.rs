//! Undo/redo stack of move commands with a clean checkpoint.
//!
//! `index` counts the commands currently applied. The clean checkpoint marks
//! an index the caller considers "reached" (for example, the last move played
//! from a transcript) so the board can be walked back to it after
//! exploratory moves.

use log::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Board;
use crate::history::move_command::MoveCommand;
use crate::history::move_history::MoveHistory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditLog {
    commands: Vec<MoveCommand>,
    index: usize,
    clean_index: Option<usize>,
}

impl Default for EditLog {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            clean_index: Some(0),
        }
    }
}

impl EditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `command` and push it, discarding anything that could be redone.
    ///
    /// The command is only kept if it applied cleanly.
    pub(crate) fn push(
        &mut self,
        mut command: MoveCommand,
        board: &mut Board,
        history: &mut MoveHistory,
    ) -> Result<(), ChessErrors> {
        command.redo(board, history)?;
        self.commands.truncate(self.index);
        if self.clean_index.is_some_and(|clean| clean > self.index) {
            self.clean_index = None;
        }
        self.commands.push(command);
        self.index += 1;
        Ok(())
    }

    /// Invert the last applied command. `Ok(false)` if there is none.
    pub(crate) fn undo(&mut self, board: &mut Board, history: &mut MoveHistory) -> Result<bool, ChessErrors> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.commands[self.index - 1].undo(board, history)?;
        self.index -= 1;
        Ok(true)
    }

    /// Re-apply the next undone command. `Ok(false)` if there is none.
    pub(crate) fn redo(&mut self, board: &mut Board, history: &mut MoveHistory) -> Result<bool, ChessErrors> {
        if !self.can_redo() {
            return Ok(false);
        }
        self.commands[self.index].redo(board, history)?;
        self.index += 1;
        Ok(true)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    pub fn clean_index(&self) -> Option<usize> {
        self.clean_index
    }

    pub fn can_restore_to_clean(&self) -> bool {
        self.clean_index.is_some_and(|clean| clean != self.index)
    }

    /// Undo or redo until the clean checkpoint is reached.
    ///
    /// Does nothing when already clean or when there is no checkpoint.
    pub(crate) fn restore_to_clean(&mut self, board: &mut Board, history: &mut MoveHistory) -> Result<(), ChessErrors> {
        let Some(clean) = self.clean_index else {
            return Ok(());
        };
        debug!("restore from {} to clean index {clean}", self.index);
        while self.index > clean {
            self.undo(board, history)?;
        }
        while self.index < clean {
            self.redo(board, history)?;
        }
        Ok(())
    }

    /// Forget every command; the empty log counts as clean.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
        self.clean_index = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::EditLog;
    use crate::game_state::chess_types::*;
    use crate::history::move_command::MoveCommand;
    use crate::history::move_history::MoveHistory;
    use crate::notation::descriptive_parser::parse_descriptive;

    struct Session {
        board: Board,
        history: MoveHistory,
        log: EditLog,
    }

    impl Session {
        fn new() -> Self {
            Self {
                board: Board::new_game(),
                history: MoveHistory::new(),
                log: EditLog::new(),
            }
        }

        fn play(&mut self, text: &str) {
            let player = self.history.player_to_move();
            let edits = parse_descriptive(&self.board, player, text).expect("move should parse");
            self.log
                .push(MoveCommand::new(player, text, edits), &mut self.board, &mut self.history)
                .expect("move should apply");
        }

        fn undo(&mut self) -> bool {
            self.log
                .undo(&mut self.board, &mut self.history)
                .expect("undo should apply")
        }

        fn redo(&mut self) -> bool {
            self.log
                .redo(&mut self.board, &mut self.history)
                .expect("redo should apply")
        }

        fn restore(&mut self) {
            self.log
                .restore_to_clean(&mut self.board, &mut self.history)
                .expect("restore should apply");
        }
    }

    #[test]
    fn fresh_log_is_clean_with_nothing_to_undo() {
        let mut session = Session::new();
        assert!(session.log.is_clean());
        assert!(!session.log.can_restore_to_clean());
        assert!(!session.undo());
        assert!(!session.redo());
    }

    #[test]
    fn undo_redo_walks_the_stack() {
        let mut session = Session::new();
        session.play("P-K4");
        session.play("P-K4");
        assert_eq!(session.log.index(), 2);

        assert!(session.undo());
        assert_eq!(session.history.player_to_move(), Color::Black);
        assert!(session.log.can_redo());
        assert!(session.redo());
        assert_eq!(session.history.text_of_last_move_made(), "P-K4");
        assert!(!session.log.can_redo());
    }

    #[test]
    fn push_truncates_redo_tail_and_stale_checkpoint() {
        let mut session = Session::new();
        session.play("P-K4");
        session.play("P-K4");
        session.log.set_clean();
        session.undo();
        session.undo();
        assert!(session.log.can_restore_to_clean());

        session.play("P-Q4");
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.log.clean_index(), None);
        assert!(!session.log.can_restore_to_clean());
        assert!(!session.log.is_clean());
    }

    #[test]
    fn restore_to_clean_is_idempotent() {
        let mut session = Session::new();
        session.play("P-K4");
        session.log.set_clean();
        let reached = session.board.clone();

        session.play("P-K4");
        session.play("Kt-KB3");
        session.restore();
        assert!(session.log.is_clean());
        assert!(session.board.same_identities(&reached));
        assert_eq!(session.history.len(), 1);

        session.restore();
        assert_eq!(session.log.index(), 1);
        assert!(session.board.same_identities(&reached));
    }

    #[test]
    fn restore_redoes_forward_to_checkpoint() {
        let mut session = Session::new();
        session.play("P-K4");
        session.play("P-K4");
        session.log.set_clean();
        session.undo();
        session.undo();

        session.restore();
        assert_eq!(session.log.index(), 2);
        assert_eq!(session.history.text_of_move(0, Color::Black), Some("P-K4"));
    }

    #[test]
    fn clear_resets_checkpoint() {
        let mut session = Session::new();
        session.play("P-K4");
        session.log.clear();
        assert!(session.log.is_empty());
        assert!(session.log.is_clean());
    }
}
