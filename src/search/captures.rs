use crate::board::{Board, Move, Side, Square, DIRECTIONS};
use std::fmt;

/// One piece's jumps in a single turn. Each jump starts where the previous one landed,
/// and no further capture is available from the final landing square.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaptureChain {
    moves: Vec<Move>,
}

impl CaptureChain {
    pub fn moves(&self) -> &[Move] { &self.moves }
    pub fn first(&self) -> Move { self.moves[0] }
    pub fn origin(&self) -> Square { self.moves[0].from }
    pub fn landing(&self) -> Square { self.moves[self.moves.len() - 1].to }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn captured(&self) -> impl Iterator<Item = Square> + '_ { self.moves.iter().filter_map(|m| m.captured()) }
}

impl fmt::Display for CaptureChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin())?;
        for m in &self.moves { write!(f, " x{} {}", m.captured().map(|s| s.to_string()).unwrap_or_default(), m.to)?; }
        Ok(())
    }
}

/// Single jumps available to the piece on `from`.
///
/// A man jumps an adjacent enemy (in any of the four directions) onto the empty square
/// right behind it. A king slides over empty squares, jumps the first piece it meets if
/// that piece is an enemy, and may land on any empty square beyond it up to the next piece.
pub fn capture_steps(board: &Board, from: Square) -> Vec<Move> {
    let Some(piece) = board.get(from) else { return Vec::new() };
    let mut out = Vec::new();
    for (dr, dc) in DIRECTIONS {
        if piece.is_king() {
            let mut n = 1;
            let mut enemy = None;
            while let Some(sq) = from.offset(dr, dc, n) {
                match (board.get(sq), enemy) {
                    (None, Some(captured)) => out.push(Move::capture(from, sq, captured)),
                    (None, None) => {}
                    (Some(p), None) if p.side != piece.side => enemy = Some(sq),
                    // own piece, or a second piece behind the first enemy
                    (Some(_), _) => break,
                }
                n += 1;
            }
        } else {
            let (Some(mid), Some(land)) = (from.offset(dr, dc, 1), from.offset(dr, dc, 2)) else { continue };
            if board.is_enemy(mid, piece.side) && board.is_empty(land) {
                out.push(Move::capture(from, land, mid));
            }
        }
    }
    out
}

pub fn has_capture_from(board: &Board, from: Square) -> bool { !capture_steps(board, from).is_empty() }

/// Every maximal capture chain the piece on `from` can play. Empty if it has no capture.
///
/// Each branch works on its own copy of the board, so callers never observe the
/// hypothetical jumps and the search can run concurrently on shared positions.
pub fn find_capture_sequences_from(board: &Board, from: Square) -> Vec<CaptureChain> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    extend_chains(*board, from, &mut prefix, &mut out);
    out
}

fn extend_chains(board: Board, from: Square, prefix: &mut Vec<Move>, out: &mut Vec<CaptureChain>) {
    let steps = capture_steps(&board, from);
    if steps.is_empty() {
        if !prefix.is_empty() { out.push(CaptureChain { moves: prefix.clone() }); }
        return;
    }
    for mv in steps {
        // the jumping piece may promote mid-chain and continue as a king
        let mut child = board;
        child.apply(&mv);
        prefix.push(mv);
        extend_chains(child, mv.to, prefix, out);
        prefix.pop();
    }
}

/// Union of `find_capture_sequences_from` over every piece of `side`.
pub fn find_all_captures(board: &Board, side: Side) -> Vec<CaptureChain> {
    board.squares_of(side).flat_map(|sq| find_capture_sequences_from(board, sq)).collect()
}
