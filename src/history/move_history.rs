//! Ledger of move texts as entered, paired by turn.
//!
//! The ledger only ever grows or shrinks at its end: moves are appended as
//! they are made and removed as they are undone. There is always a trailing
//! pair whose White half is blank while White is to move.

use std::io::{self, Write};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Color;

/// One turn: White's move text and Black's (empty until Black has moved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePair {
    pub white: String,
    pub black: String,
}

impl MovePair {
    pub fn text(&self, player: Color) -> &str {
        match player {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    pairs: Vec<MovePair>,
    player_to_move: Color,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self {
            pairs: vec![MovePair::default()],
            player_to_move: Color::White,
        }
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn player_to_move(&self) -> Color {
        self.player_to_move
    }

    /// Number of single moves recorded.
    pub fn len(&self) -> usize {
        (self.pairs.len() - 1) * 2 + self.player_to_move.index()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every turn, ending with the pair awaiting the next move.
    pub fn pairs(&self) -> &[MovePair] {
        &self.pairs
    }

    /// Text of `player`'s move on zero-based `turn`, if it has been made.
    pub fn text_of_move(&self, turn: usize, player: Color) -> Option<&str> {
        let made = turn * 2 + player.index() < self.len();
        made.then(|| self.pairs[turn].text(player))
    }

    /// Text of the most recent move, empty at game start.
    pub fn text_of_last_move_made(&self) -> &str {
        let Some(last) = self.len().checked_sub(1) else {
            return "";
        };
        let player = if last % 2 == 0 { Color::White } else { Color::Black };
        self.pairs[last / 2].text(player)
    }

    pub fn append_move(&mut self, player: Color, text: &str) -> Result<(), ChessErrors> {
        if player != self.player_to_move {
            return Err(ChessErrors::HistoryOutOfTurn {
                expected: self.player_to_move,
                actual: player,
            });
        }
        let pair = self.pairs.last_mut().ok_or(ChessErrors::HistoryEmpty)?;
        match player {
            Color::White => pair.white = text.to_owned(),
            Color::Black => {
                pair.black = text.to_owned();
                self.pairs.push(MovePair::default());
            }
        }
        self.player_to_move = player.opposite();
        Ok(())
    }

    /// Drop the most recent move and return its text.
    pub fn remove_last_move(&mut self) -> Result<String, ChessErrors> {
        if self.is_empty() {
            return Err(ChessErrors::HistoryEmpty);
        }
        if self.player_to_move == Color::White {
            self.pairs.pop();
        }
        let pair = self.pairs.last_mut().ok_or(ChessErrors::HistoryEmpty)?;
        let removed = match self.player_to_move {
            Color::White => std::mem::take(&mut pair.black),
            Color::Black => std::mem::take(&mut pair.white),
        };
        self.player_to_move = self.player_to_move.opposite();
        Ok(removed)
    }

    /// Write one line per turn: optional `"<n>. "`, White's move, a tab,
    /// Black's move.
    pub fn save_move_history<W: Write>(&self, out: &mut W, insert_turn_number: bool) -> io::Result<()> {
        let mut pairs = self.pairs.as_slice();
        if pairs.last().is_some_and(|pair| pair.white.is_empty()) {
            pairs = &pairs[..pairs.len() - 1];
        }
        for (turn, pair) in pairs.iter().enumerate() {
            if insert_turn_number {
                write!(out, "{}. ", turn + 1)?;
            }
            writeln!(out, "{}\t{}", pair.white, pair.black)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveHistory, MovePair};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::Color;

    fn played(moves: &[&str]) -> MoveHistory {
        let mut history = MoveHistory::new();
        for text in moves {
            let player = history.player_to_move();
            history.append_move(player, text).expect("append in turn");
        }
        history
    }

    #[test]
    fn appends_alternate_players() {
        let history = played(&["P-K4", "P-K4", "Kt-KB3"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.pairs().len(), 2);
        assert_eq!(history.player_to_move(), Color::Black);
        assert_eq!(history.text_of_move(0, Color::Black), Some("P-K4"));
        assert_eq!(history.text_of_move(1, Color::White), Some("Kt-KB3"));
        assert_eq!(history.text_of_move(1, Color::Black), None);
        assert_eq!(history.text_of_last_move_made(), "Kt-KB3");
    }

    #[test]
    fn trailing_pair_awaits_white() {
        let mut history = MoveHistory::new();
        assert_eq!(history.pairs().len(), 1);
        assert_eq!(history.pairs()[0], MovePair::default());

        history.append_move(Color::White, "P-K4").expect("white move");
        assert_eq!(history.pairs().len(), 1);
        history.append_move(Color::Black, "P-K4").expect("black move");
        assert_eq!(history.pairs().len(), 2);
        assert_eq!(history.pairs()[1], MovePair::default());
        assert_eq!(history.text_of_move(1, Color::White), None);

        history.remove_last_move().expect("black move present");
        assert_eq!(history.pairs().len(), 1);
        assert_eq!(history.pairs()[0].black, "");
        history.remove_last_move().expect("white move present");
        assert_eq!(history.pairs(), [MovePair::default()]);

        history.append_move(Color::White, "P-Q4").expect("white move");
        history.clear();
        assert_eq!(history.pairs().len(), 1);
        assert_eq!(history.player_to_move(), Color::White);
    }

    #[test]
    fn out_of_turn_append_is_rejected() {
        let mut history = MoveHistory::new();
        let err = history
            .append_move(Color::Black, "P-K4")
            .expect_err("white moves first");
        assert!(matches!(
            err,
            ChessErrors::HistoryOutOfTurn {
                expected: Color::White,
                actual: Color::Black
            }
        ));
    }

    #[test]
    fn remove_restores_previous_last_move() {
        let mut history = played(&["P-K4", "P-QB4"]);
        assert_eq!(history.remove_last_move().expect("black move present"), "P-QB4");
        assert_eq!(history.player_to_move(), Color::Black);
        assert_eq!(history.text_of_last_move_made(), "P-K4");

        assert_eq!(history.remove_last_move().expect("white move present"), "P-K4");
        assert_eq!(history.text_of_last_move_made(), "");
        assert!(history.is_empty());
        assert!(matches!(
            history.remove_last_move(),
            Err(ChessErrors::HistoryEmpty)
        ));
    }

    #[test]
    fn save_writes_numbered_tab_separated_pairs() {
        let history = played(&["P-K4", "P-K4", "Kt-KB3"]);
        let mut out = Vec::new();
        history.save_move_history(&mut out, true).expect("write to vec");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "1. P-K4\tP-K4\n2. Kt-KB3\t\n"
        );

        let mut bare = Vec::new();
        history.save_move_history(&mut bare, false).expect("write to vec");
        assert_eq!(
            String::from_utf8(bare).expect("utf8"),
            "P-K4\tP-K4\nKt-KB3\t\n"
        );
    }

    #[test]
    fn empty_history_saves_nothing() {
        let mut out = Vec::new();
        MoveHistory::new()
            .save_move_history(&mut out, true)
            .expect("write to vec");
        assert!(out.is_empty());
    }
}
