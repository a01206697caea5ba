//! Step-by-step playback of a saved game transcript.
//!
//! A transcript is whitespace-separated move text, optionally with turn
//! numbers ("1.", "2", ...) in front of each White move. Playback only
//! proceeds while the model sits at its clean checkpoint, which each
//! successful step moves forward; exploratory moves made in between block
//! playback until the caller returns to the reached position.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::board_model::BoardModel;
use crate::chess_errors::ChessErrors;

#[derive(Debug)]
pub enum StepOutcome {
    /// The next token was played.
    Moved,
    /// Every token has been played.
    AtEnd,
    /// The model has moved away from the reached position.
    Blocked,
    /// The next token was rejected; the runner stays on it.
    Failed(ChessErrors),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptRunner {
    tokens: Vec<String>,
    index: usize,
}

impl TranscriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();

        // Turn numbers only ever stand where a White move is expected.
        let mut i = 0;
        while i < tokens.len() {
            if i % 2 == 0 && is_turn_number(&tokens[i]) {
                tokens.remove(i);
            } else {
                i += 1;
            }
        }

        Self { tokens, index: 0 }
    }

    pub fn read_file(path: &Path) -> Result<Self, ChessErrors> {
        let text = fs::read_to_string(path)?;
        let runner = Self::from_text(&text);
        info!("read {} moves from {}", runner.tokens.len(), path.display());
        Ok(runner)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn can_continue(&self, model: &BoardModel) -> bool {
        !self.at_end() && model.is_clean()
    }

    /// Play the next token.
    pub fn step(&mut self, model: &mut BoardModel) -> StepOutcome {
        if self.at_end() {
            return StepOutcome::AtEnd;
        }
        if !model.is_clean() {
            warn!("transcript step blocked: board has left the reached position");
            return StepOutcome::Blocked;
        }
        match model.make_move(&self.tokens[self.index]) {
            Ok(()) => {
                self.index += 1;
                model.set_clean();
                StepOutcome::Moved
            }
            Err(err) => StepOutcome::Failed(err),
        }
    }

    /// Step until something other than a move happens, up to the configured
    /// limit. Returns how many moves were played and the final outcome.
    pub fn run_to_end(&mut self, model: &mut BoardModel) -> (usize, StepOutcome) {
        let limit = model.config().max_transcript_steps;
        let mut moved = 0;
        loop {
            if moved >= limit {
                return (moved, StepOutcome::Moved);
            }
            match self.step(model) {
                StepOutcome::Moved => moved += 1,
                outcome => return (moved, outcome),
            }
        }
    }

    /// Start a new game and rewind to the first token.
    pub fn restart(&mut self, model: &mut BoardModel) {
        model.new_game();
        self.index = 0;
    }

    /// Undo or redo back to the last position reached by playback.
    pub fn return_to_reached(&mut self, model: &mut BoardModel) -> Result<(), ChessErrors> {
        model.restore_to_clean()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.index = 0;
    }
}

fn is_turn_number(token: &str) -> bool {
    let digits = token.strip_suffix('.').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
