// Brazilian checkers: rule engine plus a two-player line-protocol session server
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod perft;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod server;
pub mod session;
pub mod transport;

pub use board::{Board, Move, MoveKind, Piece, Rank, Side, Square};
pub use error::{IllegalMove, ProtocolError, SessionError};
pub use rules::{GameOutcome, MoveOutcome, Snapshot, TurnController, TurnState, WinReason};
pub use search::{find_all_captures, find_capture_sequences_from, CaptureChain};
pub use session::{FinishReason, GameSession, SessionStatus};
