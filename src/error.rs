use crate::board::{Side, Square};
use thiserror::Error;

/// Why a submitted move was refused. Board and turn state are untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("coordinates off the board")]
    OffBoard,
    #[error("no piece on {0}")]
    EmptyOrigin(Square),
    #[error("piece on {0} does not belong to the side to move")]
    NotYourPiece(Square),
    #[error("{0} is a light square")]
    LightSquare(Square),
    #[error("move is not diagonal")]
    NotDiagonal,
    #[error("destination {0} is occupied")]
    Occupied(Square),
    #[error("men move one square forward")]
    WrongDirection,
    #[error("path is blocked")]
    PathBlocked,
    #[error("a capture is available and must be played")]
    CaptureRequired,
    #[error("not a capture available to this piece")]
    NotACapture,
    #[error("the piece on {0} must keep capturing")]
    MustContinueFrom(Square),
    #[error("the game is over")]
    GameOver,
}

/// A line that cannot be parsed as a protocol message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown message type '{0}'")]
    UnknownType(String),
    #[error("{0} requires a payload")]
    MissingPayload(&'static str),
    #[error("expected 4 coordinates, found {0}")]
    FieldCount(usize),
    #[error("coordinate '{0}' is not an integer")]
    NotAnInteger(String),
    #[error("unknown color '{0}'")]
    UnknownColor(String),
}

/// Requests a session refuses without touching the game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("not {0}'s turn")]
    OutOfTurn(Side),
    #[error("game is not in progress")]
    NotInProgress,
    #[error("unexpected message {0}")]
    Unexpected(&'static str),
}
