//! Line-oriented command shell over a `BoardModel`.
//!
//! Reads commands from stdin, routes them to the board model or transcript
//! runner, and prints the queued board events after each one. Any line that
//! is not a command is taken as move text for the player to move.

use std::io::{self, BufRead, Write};
use std::path::Path;

use log::debug;

use crate::board_model::{BoardModel, SessionConfig};
use crate::game_state::board_events::BoardEvent;
use crate::notation::descriptive_names::square_to_descriptive;
use crate::utils::render_board::render_board;
use crate::utils::transcript::{StepOutcome, TranscriptRunner};

const HELP_TEXT: &str = "\
commands: new, undo, redo, show, history, save <path>, open <path>,
          step, run, restart, return, status, help, quit
anything else is played as a move, e.g. P-K4, KtxP, O-O";

pub fn run_stdio_loop(config: SessionConfig, transcript: Option<TranscriptRunner>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut shell = ShellState::new(config, transcript);

    writeln!(stdout, "{}", render_board(shell.model.board()))?;
    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = shell.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ShellState {
    model: BoardModel,
    runner: TranscriptRunner,
}

impl ShellState {
    pub fn new(config: SessionConfig, transcript: Option<TranscriptRunner>) -> Self {
        Self {
            model: BoardModel::with_config(config),
            runner: transcript.unwrap_or_default(),
        }
    }

    pub fn model(&self) -> &BoardModel {
        &self.model
    }

    pub fn runner(&self) -> &TranscriptRunner {
        &self.runner
    }

    /// Handle one input line. Returns `true` when the shell should exit.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (trimmed, ""),
        };

        match cmd {
            "quit" | "exit" => return Ok(true),
            "help" => writeln!(out, "{HELP_TEXT}")?,
            "new" => {
                self.model.new_game();
                self.runner.clear();
            }
            "undo" => {
                if let Err(err) = self.model.undo() {
                    writeln!(out, "error: {err}")?;
                }
            }
            "redo" => {
                if let Err(err) = self.model.redo() {
                    writeln!(out, "error: {err}")?;
                }
            }
            "show" => writeln!(out, "{}", render_board(self.model.board()))?,
            "history" => self.model.save_move_history(out, true)?,
            "save" if !arg.is_empty() => {
                if let Err(err) = self.model.save_to_path(Path::new(arg)) {
                    writeln!(out, "error: {err}")?;
                }
            }
            "open" if !arg.is_empty() => match TranscriptRunner::read_file(Path::new(arg)) {
                Ok(runner) => {
                    self.runner = runner;
                    self.runner.restart(&mut self.model);
                    writeln!(out, "opened {} moves", self.runner.tokens().len())?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "save" | "open" => writeln!(out, "usage: {cmd} <path>")?,
            "step" => {
                let outcome = self.runner.step(&mut self.model);
                write_outcome(out, &outcome)?;
            }
            "run" => {
                let (moved, outcome) = self.runner.run_to_end(&mut self.model);
                writeln!(out, "played {moved} moves")?;
                write_outcome(out, &outcome)?;
            }
            "restart" => self.runner.restart(&mut self.model),
            "return" => {
                if let Err(err) = self.runner.return_to_reached(&mut self.model) {
                    writeln!(out, "error: {err}")?;
                }
            }
            "status" => {
                writeln!(
                    out,
                    "{:?} to move; transcript {}/{}; clean {}; can return {}",
                    self.model.history().player_to_move(),
                    self.runner.current_index(),
                    self.runner.tokens().len(),
                    self.model.is_clean(),
                    self.model.can_restore_to_clean()
                )?;
            }
            _ => {
                // The diagnostic itself is printed from the queued ParserMessage.
                if let Err(err) = self.model.enter_move(trimmed) {
                    debug!("shell move {trimmed:?} failed: {err}");
                }
            }
        }

        self.write_events(out)?;
        Ok(false)
    }

    fn write_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        let player = self.model.history().player_to_move();
        for event in self.model.take_events() {
            match event {
                BoardEvent::LastMoveMade(text) if !text.is_empty() => {
                    writeln!(out, "last move: {text}")?;
                }
                BoardEvent::CheckDetected { attacker, king } => {
                    writeln!(
                        out,
                        "check: {} attacks king on {}",
                        square_to_descriptive(attacker, player.opposite()),
                        square_to_descriptive(king, player.opposite())
                    )?;
                }
                BoardEvent::ParserMessage(message) => writeln!(out, "{message}")?,
                BoardEvent::StartedNewGame => writeln!(out, "new game")?,
                BoardEvent::CleanChanged(clean) => {
                    writeln!(out, "{}", if clean { "at reached position" } else { "exploring" })?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn write_outcome(out: &mut impl Write, outcome: &StepOutcome) -> io::Result<()> {
    match outcome {
        StepOutcome::Moved => Ok(()),
        StepOutcome::AtEnd => writeln!(out, "end of transcript"),
        StepOutcome::Blocked => writeln!(out, "board has moved on; use return first"),
        StepOutcome::Failed(err) => writeln!(out, "transcript stopped: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::ShellState;
    use crate::board_model::SessionConfig;
    use crate::utils::transcript::TranscriptRunner;

    fn run(shell: &mut ShellState, line: &str) -> String {
        let mut out = Vec::new();
        let quit = shell.handle_command(line, &mut out).expect("write to vec");
        assert!(!quit);
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn moves_and_history() {
        let mut shell = ShellState::new(SessionConfig::without_autosave(), None);
        assert!(run(&mut shell, "P-K4").contains("last move: P-K4"));
        assert!(run(&mut shell, "Kt-B3").contains("Found more than one"));
        assert_eq!(run(&mut shell, "history"), "1. P-K4\t\n");
        run(&mut shell, "undo");
        assert!(shell.model().history().is_empty());
    }

    #[test]
    fn transcript_commands() {
        let transcript = TranscriptRunner::from_text("1. P-K4 P-K4 2. Kt-KB3");
        let mut shell = ShellState::new(SessionConfig::without_autosave(), Some(transcript));
        run(&mut shell, "step");
        run(&mut shell, "P-Q4");
        assert!(run(&mut shell, "step").contains("use return first"));
        run(&mut shell, "return");
        let output = run(&mut shell, "run");
        assert!(output.contains("played 2 moves"));
        assert!(output.contains("end of transcript"));
        assert_eq!(shell.runner().current_index(), 3);
    }

    #[test]
    fn quit_ends_loop() {
        let mut shell = ShellState::new(SessionConfig::without_autosave(), None);
        let mut out = Vec::new();
        assert!(shell.handle_command("quit", &mut out).expect("write to vec"));
    }
}
