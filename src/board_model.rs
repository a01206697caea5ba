//! Game controller tying the board, move ledger and edit log together.
//!
//! `BoardModel` is the only public way to change a game: it parses move
//! text, wraps the result in a `MoveCommand` and pushes it on the edit log.
//! Every observable change is queued as a `BoardEvent` for the caller to
//! drain with `take_events`.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{info, warn};

use crate::chess_errors::ChessErrors;
use crate::game_state::board_events::BoardEvent;
use crate::game_state::chess_types::*;
use crate::history::edit_log::EditLog;
use crate::history::move_command::MoveCommand;
use crate::history::move_history::MoveHistory;
use crate::notation::descriptive_parser::{parse_descriptive, strip_whitespace};

/// File name used for autosave inside the temp directory.
pub const AUTOSAVE_FILE_NAME: &str = "chess.sav";

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prefix each saved line with `"<n>. "`.
    pub insert_turn_numbers: bool,
    /// Where interactively entered games are autosaved; `None` disables.
    pub autosave_path: Option<PathBuf>,
    /// Upper bound on moves played by one transcript run.
    pub max_transcript_steps: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            insert_turn_numbers: true,
            autosave_path: Some(env::temp_dir().join(AUTOSAVE_FILE_NAME)),
            max_transcript_steps: 1000,
        }
    }
}

impl SessionConfig {
    /// Settings without autosave, for scripted use.
    pub fn without_autosave() -> Self {
        Self {
            autosave_path: None,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct BoardModel {
    board: Board,
    history: MoveHistory,
    log: EditLog,
    config: SessionConfig,
    was_clean: bool,
    last_autosave: Option<DateTime<Local>>,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardModel {
    /// Model at the starting position with default settings.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_board(Board::new_game(), config)
    }

    /// Model over an arbitrary position, White to move.
    pub fn from_board(mut board: Board, config: SessionConfig) -> Self {
        board.take_events();
        Self {
            board,
            history: MoveHistory::new(),
            log: EditLog::new(),
            config,
            was_clean: true,
            last_autosave: None,
        }
    }

    /// Clear the log and ledger and lay out a fresh game.
    pub fn new_game(&mut self) {
        info!("new game");
        self.log.clear();
        self.history.clear();
        self.board.setup_initial_pieces();
        self.board.push_event(BoardEvent::StartedNewGame);
        self.board.push_event(BoardEvent::LastMoveMade(String::new()));
        self.sync_clean();
    }

    /// Parse `text` as `player`'s move and make it.
    ///
    /// On failure the diagnostic is also queued as a `ParserMessage`.
    pub fn parse_and_make_move(&mut self, player: Color, text: &str) -> Result<(), ChessErrors> {
        let text = strip_whitespace(text);
        let result = if player != self.history.player_to_move() {
            Err(ChessErrors::NotPlayersTurn(player))
        } else {
            parse_descriptive(&self.board, player, &text).and_then(|edits| {
                let command = MoveCommand::new(player, text.as_str(), edits);
                self.log.push(command, &mut self.board, &mut self.history)
            })
        };

        if let Err(err) = &result {
            warn!("move {text:?} rejected: {err}");
            self.board.push_event(BoardEvent::ParserMessage(err.to_string()));
        }
        self.sync_clean();
        result
    }

    /// Make `text` as the move of whoever is to move.
    pub fn make_move(&mut self, text: &str) -> Result<(), ChessErrors> {
        self.parse_and_make_move(self.history.player_to_move(), text)
    }

    /// Make a move typed by a person, autosaving afterwards when configured.
    ///
    /// Autosave failures are logged and do not undo the move.
    pub fn enter_move(&mut self, text: &str) -> Result<(), ChessErrors> {
        self.make_move(text)?;
        if let Err(err) = self.autosave() {
            warn!("autosave failed: {err}");
        }
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool, ChessErrors> {
        let undone = self.log.undo(&mut self.board, &mut self.history)?;
        self.sync_clean();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, ChessErrors> {
        let redone = self.log.redo(&mut self.board, &mut self.history)?;
        self.sync_clean();
        Ok(redone)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    pub fn set_clean(&mut self) {
        self.log.set_clean();
        self.sync_clean();
    }

    pub fn is_clean(&self) -> bool {
        self.log.is_clean()
    }

    pub fn can_restore_to_clean(&self) -> bool {
        self.log.can_restore_to_clean()
    }

    pub fn restore_to_clean(&mut self) -> Result<(), ChessErrors> {
        let restored = self.log.restore_to_clean(&mut self.board, &mut self.history);
        self.sync_clean();
        restored
    }

    pub fn save_move_history<W: Write>(&self, out: &mut W, insert_turn_number: bool) -> io::Result<()> {
        self.history.save_move_history(out, insert_turn_number)
    }

    /// Save the ledger to `path` using the configured turn numbering.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ChessErrors> {
        let mut out = BufWriter::new(File::create(path)?);
        self.save_move_history(&mut out, self.config.insert_turn_numbers)?;
        out.flush()?;
        info!("saved {} moves to {}", self.history.len(), path.display());
        Ok(())
    }

    /// Save to the autosave path, if one is configured. Returns whether a
    /// save happened.
    pub fn autosave(&mut self) -> Result<bool, ChessErrors> {
        let Some(path) = self.config.autosave_path.clone() else {
            return Ok(false);
        };
        self.save_to_path(&path)?;
        self.last_autosave = Some(Local::now());
        Ok(true)
    }

    pub fn last_autosave(&self) -> Option<DateTime<Local>> {
        self.last_autosave
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.board.take_events()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn edit_log(&self) -> &EditLog {
        &self.log
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn sync_clean(&mut self) {
        let clean = self.log.is_clean();
        if clean != self.was_clean {
            self.was_clean = clean;
            self.board.push_event(BoardEvent::CleanChanged(clean));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardModel, SessionConfig};
    use crate::chess_errors::{ChessErrors, ErrorClass};
    use crate::game_state::board_events::BoardEvent;
    use crate::game_state::chess_types::*;
    use crate::utils::fen_placement::parse_placement;

    fn model() -> BoardModel {
        BoardModel::with_config(SessionConfig::without_autosave())
    }

    #[test]
    fn moves_alternate_and_strip_whitespace() {
        let mut model = model();
        model.make_move("P - K4").expect("white move");
        model.make_move("P-K4").expect("black move");
        assert_eq!(model.history().text_of_move(0, Color::White), Some("P-K4"));
        assert_eq!(model.history().player_to_move(), Color::White);
        assert!(model.board().piece_at(Square::new(4, 4)).is_some());
    }

    #[test]
    fn rejected_move_queues_parser_message() {
        let mut model = model();
        model.take_events();
        let err = model.make_move("Kt-B3").expect_err("ambiguous");
        assert_eq!(err.class(), ErrorClass::Ambiguity);
        assert_eq!(
            model.take_events(),
            vec![BoardEvent::ParserMessage(
                "Found more than one piece/square which satisfies move: \"Kt-B3\"".to_owned()
            )]
        );
        assert!(model.history().is_empty());
    }

    #[test]
    fn wrong_player_is_rejected() {
        let mut model = model();
        let err = model
            .parse_and_make_move(Color::Black, "P-K4")
            .expect_err("white moves first");
        assert!(matches!(err, ChessErrors::NotPlayersTurn(Color::Black)));
    }

    #[test]
    fn clean_changes_are_reported() {
        let mut model = model();
        model.make_move("P-K4").expect("white move");
        let events = model.take_events();
        assert!(events.contains(&BoardEvent::CleanChanged(false)));

        model.set_clean();
        assert_eq!(model.take_events(), vec![BoardEvent::CleanChanged(true)]);

        model.make_move("P-K4").expect("black move");
        assert!(model.can_restore_to_clean());
        model.restore_to_clean().expect("restore");
        assert!(model.is_clean());
        assert_eq!(model.history().len(), 1);
        assert!(model
            .take_events()
            .contains(&BoardEvent::CleanChanged(true)));
    }

    #[test]
    fn new_game_resets_everything() {
        let mut model = model();
        model.make_move("P-K4").expect("white move");
        model.take_events();

        model.new_game();
        assert!(model.history().is_empty());
        assert!(!model.can_undo());
        assert!(model.is_clean());
        assert!(model.board().same_position(&Board::new_game()));

        let events = model.take_events();
        assert_eq!(events[0], BoardEvent::ModelReset);
        assert_eq!(events[1], BoardEvent::StartedNewGame);
        assert!(events.contains(&BoardEvent::CleanChanged(true)));
    }

    #[test]
    fn undo_and_redo_report_availability() {
        let mut model = model();
        assert!(!model.undo().expect("no-op undo"));
        model.make_move("P-QB4").expect("white move");
        assert!(model.undo().expect("undo"));
        assert!(model.board().same_identities(&Board::new_game()));
        assert!(model.redo().expect("redo"));
        assert!(!model.redo().expect("no-op redo"));
    }

    #[test]
    fn custom_position_plays_scenarios() {
        let board = parse_placement("8/8/8/3Pp3/8/8/8/8").expect("placement should parse");
        let mut model = BoardModel::from_board(board, SessionConfig::without_autosave());
        model.make_move("PxPep").expect("en passant");
        assert!(model.board().piece_at(Square::new(4, 4)).is_none());
        assert!(model.board().piece_at(Square::new(5, 4)).is_some());
        assert_eq!(model.board().piece_count(), 1);
    }

    #[test]
    fn autosave_writes_transcript() {
        let path = std::env::temp_dir().join(format!(
            "descriptive_chess_autosave_{}.sav",
            std::process::id()
        ));
        let config = SessionConfig {
            autosave_path: Some(path.clone()),
            ..SessionConfig::default()
        };
        let mut model = BoardModel::with_config(config);
        assert!(model.last_autosave().is_none());
        model.enter_move("P-K4").expect("white move");
        assert!(model.last_autosave().is_some());

        let saved = std::fs::read_to_string(&path).expect("autosave file exists");
        assert_eq!(saved, "1. P-K4\t\n");
        let _ = std::fs::remove_file(&path);
    }
}
