use super::{Board, Side, Square};
use crate::error::IllegalMove;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Simple,
    Capture { captured: Square },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn simple(from: Square, to: Square) -> Self { Self { from, to, kind: MoveKind::Simple } }
    pub fn capture(from: Square, to: Square, captured: Square) -> Self { Self { from, to, kind: MoveKind::Capture { captured } } }
    pub fn is_capture(&self) -> bool { matches!(self.kind, MoveKind::Capture { .. }) }
    pub fn captured(&self) -> Option<Square> {
        match self.kind { MoveKind::Capture { captured } => Some(captured), MoveKind::Simple => None }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Simple => write!(f, "{}->{}", self.from, self.to),
            MoveKind::Capture { captured } => write!(f, "{}x{}->{}", self.from, captured, self.to),
        }
    }
}

/// Unit step and distance from `from` to `to`, if they share a diagonal.
pub(crate) fn diagonal(from: Square, to: Square) -> Option<((i8, i8), i32)> {
    let dr = to.row() as i32 - from.row() as i32;
    let dc = to.col() as i32 - from.col() as i32;
    if dr == 0 || dr.abs() != dc.abs() { return None; }
    Some(((dr.signum() as i8, dc.signum() as i8), dr.abs()))
}

/// Legality of a non-capturing move for `side`. Mandatory capture is not checked here.
pub fn validate_simple(board: &Board, side: Side, from: Square, to: Square) -> Result<(), IllegalMove> {
    let piece = board.get(from).ok_or(IllegalMove::EmptyOrigin(from))?;
    if piece.side != side { return Err(IllegalMove::NotYourPiece(from)); }
    if !to.is_dark() { return Err(IllegalMove::LightSquare(to)); }
    let ((dr, dc), dist) = diagonal(from, to).ok_or(IllegalMove::NotDiagonal)?;
    if !board.is_empty(to) { return Err(IllegalMove::Occupied(to)); }
    if piece.is_king() {
        let blocked = (1..dist).filter_map(|i| from.offset(dr, dc, i)).any(|sq| !board.is_empty(sq));
        if blocked { return Err(IllegalMove::PathBlocked); }
    } else if dist != 1 || dr != side.forward() {
        return Err(IllegalMove::WrongDirection);
    }
    Ok(())
}

/// All legal simple moves of the piece on `from`.
pub fn simple_moves_from(board: &Board, from: Square) -> Vec<Move> {
    let Some(piece) = board.get(from) else { return Vec::new() };
    let mut out = Vec::new();
    for (dr, dc) in super::DIRECTIONS {
        if !piece.is_king() && dr != piece.side.forward() { continue; }
        let mut n = 1;
        while let Some(to) = from.offset(dr, dc, n) {
            if !board.is_empty(to) { break; }
            out.push(Move::simple(from, to));
            if !piece.is_king() { break; }
            n += 1;
        }
    }
    out
}
