//! Crate root module declarations for the Descriptive Chess board.
//!
//! This file exposes the board and legality checks, the Descriptive-notation
//! parser, the undo/redo history, the board model controller, and the text
//! shell so the binary, tests, and benches can import stable module paths.

pub mod game_state {
    pub mod board;
    pub mod board_events;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod move_generation {
    pub mod legal_move_checks;
}

pub mod notation {
    pub mod descriptive_names;
    pub mod descriptive_parser;
    pub mod primitive_edit;
}

pub mod history {
    pub mod edit_log;
    pub mod move_command;
    pub mod move_history;
}

pub mod board_model;

pub mod shell {
    pub mod shell_top;
}

pub mod utils {
    pub mod fen_placement;
    pub mod render_board;
    pub mod transcript;
}

pub mod chess_errors;
