//! Errors used throughout the board model.
//!
//! `ChessErrors` is the single error type returned by the notation parser,
//! the board primitives, the edit log and the transcript runner. Parser
//! variants are recoverable: their `Display` text is the diagnostic shown to
//! the person typing the move. Variants classed as `ErrorClass::Internal`
//! mean a command was replayed against a board it does not fit, which is a
//! defect in the calling sequence rather than bad input.

use crate::game_state::chess_types::{Color, Square};

/// Coarse classification of a `ChessErrors` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Token shape could not be parsed at all.
    Syntax,
    /// A named piece or qualifier resolved to no square.
    Reference,
    /// More than one legal candidate survived resolution.
    Ambiguity,
    /// The resolved move fails geometry, obstruction, occupancy or turn order.
    Legality,
    /// Illegal or missing promotion specifier.
    Promotion,
    /// Board/ledger invariant broken by a command replay.
    Internal,
    /// Reading or writing a transcript failed.
    Io,
}

/// Unified error type for the board model.
#[derive(Debug, thiserror::Error)]
pub enum ChessErrors {
    /// Nothing left after stripping whitespace.
    #[error("No move text entered")]
    EmptyMoveText,

    /// Hyphenated text that is neither a castling move nor `piece-square`.
    #[error("Unrecognised input for apparently move-type move: \"{0}\"")]
    UnrecognisedMoveType(String),

    /// Text with more than one `x`.
    #[error("Unrecognised input for apparently capture-type move: \"{0}\"")]
    UnrecognisedCaptureType(String),

    /// Text with neither `-` nor `x`.
    #[error("Unrecognised input for move: \"{0}\"")]
    UnrecognisedMove(String),

    /// `O-...` text that is not `O-O` or `O-O-O`.
    #[error("Unrecognised castling-type move: \"{0}\"")]
    UnrecognisedCastling(String),

    /// Left-hand side (or capture target) does not name a piece.
    #[error("Unrecognised piece: \"{0}\"")]
    UnrecognisedPiece(String),

    /// A `K`/`QB`/`(B1)` style qualifier could not be applied.
    #[error("Unrecognised or disallowed piece qualifier: \"{0}\"")]
    UnrecognisedQualifier(String),

    /// Destination text is not a `<column><rank>` square.
    #[error("Unrecognised square to move to: \"{0}\"")]
    UnrecognisedSquare(String),

    /// `=X` where X is not a piece name.
    #[error("Could not parse piece to promote to: \"{0}\"")]
    UnrecognisedPromotion(String),

    /// `=P` or `=K`.
    #[error("Illegal piece to promote to: \"{0}\"")]
    IllegalPromotionPiece(String),

    /// The mover has no piece matching the left-hand side.
    #[error("Could not find piece to move: \"{0}\"")]
    PieceNotFound(String),

    /// The opponent has no piece matching the capture target.
    #[error("Could not find piece to capture: \"{0}\"")]
    CaptureTargetNotFound(String),

    /// No candidate pair survived a move resolution.
    #[error("Could not find a piece which can move to square: \"{0}\"")]
    NoLegalMove(String),

    /// No candidate pair survived a capture resolution.
    #[error("Could not find a piece move which can capture: \"{0}\"")]
    NoLegalCapture(String),

    /// More than one candidate pair survived a move resolution.
    #[error("Found more than one piece/square which satisfies move: \"{0}\"")]
    AmbiguousMove(String),

    /// More than one candidate pair survived a capture resolution.
    #[error("Found more than one piece/square which satisfies capture: \"{0}\"")]
    AmbiguousCapture(String),

    /// Plain move onto an occupied square.
    #[error("Square to move to is occupied: \"{0}\"")]
    DestinationOccupied(String),

    /// Capture onto a square not holding an opposing piece.
    #[error("Square to capture is not occupied by opposing piece: \"{0}\"")]
    CaptureSquareNotOpposing(String),

    /// Castling without the king on its home square.
    #[error("King not on King's square for castling-type move")]
    CastlingKingMissing,

    /// Castling without the rook on its home square.
    #[error("Rook not on Rook's square for castling-type move")]
    CastlingRookMissing,

    /// Castling through or onto occupied squares.
    #[error("Intervening pieces for castling-type move")]
    CastlingObstructed,

    /// A move was submitted for the side not on move.
    #[error("It is not {0:?}'s turn to move")]
    NotPlayersTurn(Color),

    /// `=X` on a piece that is not a pawn.
    #[error("Piece to be promoted is not a pawn: \"{0}\"")]
    PromotedPieceNotPawn(String),

    /// `=X` on a pawn not reaching its last rank.
    #[error("Pawn to be promoted is not on 8th rank: \"{0}\"")]
    PromotionNotOnLastRank(String),

    /// Pawn reaching its last rank without `=X`.
    #[error("Pawn on 8th rank missing \"=...\" promotion specifier: \"{0}\"")]
    MissingPromotion(String),

    /// Move or remove from a square that holds nothing.
    #[error("No piece on square {0}")]
    EmptySquare(Square),

    /// Add or move onto a square that already holds a piece.
    #[error("Square {0} is already occupied")]
    SquareOccupied(Square),

    /// A recorded remove found a different piece than the one it captured.
    #[error("Square {0} does not hold the piece the command expects")]
    UnexpectedPiece(Square),

    /// Ledger appended out of turn.
    #[error("Move history expected {expected:?} to move, got {actual:?}")]
    HistoryOutOfTurn { expected: Color, actual: Color },

    /// Ledger asked to remove a move when none has been made.
    #[error("Move history has no move to remove")]
    HistoryEmpty,

    /// Board placement text could not be read.
    #[error("Invalid board placement: {0}")]
    InvalidPlacement(String),

    /// Transcript file could not be read or written.
    #[error("Transcript I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ChessErrors {
    /// Classify the error for callers that branch on failure type.
    pub fn class(&self) -> ErrorClass {
        use ChessErrors::*;
        match self {
            EmptyMoveText
            | UnrecognisedMoveType(_)
            | UnrecognisedCaptureType(_)
            | UnrecognisedMove(_)
            | UnrecognisedCastling(_)
            | UnrecognisedPiece(_)
            | UnrecognisedQualifier(_)
            | UnrecognisedSquare(_)
            | UnrecognisedPromotion(_)
            | InvalidPlacement(_) => ErrorClass::Syntax,
            PieceNotFound(_) | CaptureTargetNotFound(_) => ErrorClass::Reference,
            AmbiguousMove(_) | AmbiguousCapture(_) => ErrorClass::Ambiguity,
            NoLegalMove(_)
            | NoLegalCapture(_)
            | DestinationOccupied(_)
            | CaptureSquareNotOpposing(_)
            | CastlingKingMissing
            | CastlingRookMissing
            | CastlingObstructed
            | NotPlayersTurn(_) => ErrorClass::Legality,
            IllegalPromotionPiece(_)
            | PromotedPieceNotPawn(_)
            | PromotionNotOnLastRank(_)
            | MissingPromotion(_) => ErrorClass::Promotion,
            EmptySquare(_)
            | SquareOccupied(_)
            | UnexpectedPiece(_)
            | HistoryOutOfTurn { .. }
            | HistoryEmpty => ErrorClass::Internal,
            Io(_) => ErrorClass::Io,
        }
    }
}
