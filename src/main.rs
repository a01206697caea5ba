//! Interactive Descriptive-notation board.
//!
//! Usage:
//! `cargo run -- [transcript.sav]`
//!
//! `DESCRIPTIVE_CHESS_AUTOSAVE` overrides the autosave path (`off` disables
//! it). Log output is controlled with `RUST_LOG`.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::error;

use descriptive_chess::board_model::SessionConfig;
use descriptive_chess::shell::shell_top::run_stdio_loop;
use descriptive_chess::utils::transcript::TranscriptRunner;

const AUTOSAVE_ENV: &str = "DESCRIPTIVE_CHESS_AUTOSAVE";

fn config_from_env() -> SessionConfig {
    let mut config = SessionConfig::default();
    if let Ok(value) = env::var(AUTOSAVE_ENV) {
        config.autosave_path = match value.trim() {
            "" | "off" => None,
            path => Some(PathBuf::from(path)),
        };
    }
    config
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let transcript = match env::args().nth(1) {
        Some(path) => match TranscriptRunner::read_file(Path::new(&path)) {
            Ok(runner) => Some(runner),
            Err(err) => {
                error!("could not open {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    match run_stdio_loop(config_from_env(), transcript) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
