use crate::board::{validate_simple, Board, Move, Side, Square};
use crate::error::IllegalMove;
use crate::search::{find_all_captures, find_capture_sequences_from, has_capture_from, legal_moves};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser has pieces but no legal move.
    Blockade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Side,
    pub reason: WinReason,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            WinReason::NoPieces => write!(f, "{} venceram!", self.winner),
            WinReason::Blockade => write!(f, "{} venceram! ({} sem movimentos)", self.winner, self.winner.other()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    ToMove(Side),
    /// The piece on the square just captured and has to capture again.
    ContinuationLocked(Side, Square),
    GameOver(GameOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub promoted: bool,
    pub state: TurnState,
}

/// Serializable view of a position for renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Vec<String>,
    pub state: TurnState,
}

/// Sole owner of a game's board and turn state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnController {
    board: Board,
    state: TurnState,
}

impl Default for TurnController {
    fn default() -> Self { Self::new() }
}

impl TurnController {
    /// Standard opening position, White to move.
    pub fn new() -> Self { Self::from_position(Board::startpos(), Side::White) }

    /// Arbitrary position with `side` to move. The game may already be over.
    pub fn from_position(board: Board, side: Side) -> Self {
        let state = Self::evaluate(&board, side);
        Self { board, state }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn state(&self) -> TurnState { self.state }

    /// Side allowed to submit the next move, `None` once the game is over.
    pub fn side_to_act(&self) -> Option<Side> {
        match self.state {
            TurnState::ToMove(s) | TurnState::ContinuationLocked(s, _) => Some(s),
            TurnState::GameOver(_) => None,
        }
    }

    pub fn lock(&self) -> Option<Square> {
        match self.state { TurnState::ContinuationLocked(_, sq) => Some(sq), _ => None }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.state { TurnState::GameOver(o) => Some(o), _ => None }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        match self.side_to_act() {
            Some(side) => legal_moves(&self.board, side, self.lock()),
            None => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot { Snapshot { rows: self.board.rows(), state: self.state } }

    /// Classify `from -> to` as the move the side to act would be playing, without applying it.
    pub fn resolve(&self, from: Square, to: Square) -> Result<Move, IllegalMove> {
        let side = self.side_to_act().ok_or(IllegalMove::GameOver)?;
        let lock = self.lock();
        if let Some(sq) = lock { if from != sq { return Err(IllegalMove::MustContinueFrom(sq)); } }
        let piece = self.board.get(from).ok_or(IllegalMove::EmptyOrigin(from))?;
        if piece.side != side { return Err(IllegalMove::NotYourPiece(from)); }
        if !to.is_dark() { return Err(IllegalMove::LightSquare(to)); }

        let chains = match lock {
            Some(sq) => find_capture_sequences_from(&self.board, sq),
            None => find_all_captures(&self.board, side),
        };
        if chains.is_empty() {
            validate_simple(&self.board, side, from, to)?;
            return Ok(Move::simple(from, to));
        }
        if let Some(chain) = chains.iter().find(|c| c.origin() == from && c.first().to == to) {
            return Ok(chain.first());
        }
        if chains.iter().any(|c| c.origin() == from) { Err(IllegalMove::NotACapture) } else { Err(IllegalMove::CaptureRequired) }
    }

    /// Validate and play one step. On error nothing changes and the same side may resubmit.
    pub fn submit(&mut self, from: Square, to: Square) -> Result<MoveOutcome, IllegalMove> {
        let side = self.side_to_act().ok_or(IllegalMove::GameOver)?;
        let mv = match self.resolve(from, to) {
            Ok(mv) => mv,
            Err(e) => { debug!("rejected {from}->{to}: {e}"); return Err(e); }
        };
        let promoted = self.board.apply(&mv);
        self.state = if mv.is_capture() && has_capture_from(&self.board, mv.to) {
            TurnState::ContinuationLocked(side, mv.to)
        } else {
            Self::evaluate(&self.board, side.other())
        };
        debug!("played {mv}{} -> {:?}", if promoted { " (promoted)" } else { "" }, self.state);
        Ok(MoveOutcome { mv, promoted, state: self.state })
    }

    fn evaluate(board: &Board, side: Side) -> TurnState {
        if board.count(side) == 0 {
            TurnState::GameOver(GameOutcome { winner: side.other(), reason: WinReason::NoPieces })
        } else if legal_moves(board, side, None).is_empty() {
            TurnState::GameOver(GameOutcome { winner: side.other(), reason: WinReason::Blockade })
        } else {
            TurnState::ToMove(side)
        }
    }
}
