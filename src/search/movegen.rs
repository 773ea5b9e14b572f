use crate::board::moves::simple_moves_from;
use crate::board::{Board, Move, Side, Square};
use crate::search::captures::capture_steps;

/// Moves `side` may submit next. With `lock` set only that piece's jumps count; otherwise any
/// available jump excludes every simple move.
pub fn legal_moves(board: &Board, side: Side, lock: Option<Square>) -> Vec<Move> {
    if let Some(sq) = lock { return capture_steps(board, sq); }
    let caps: Vec<Move> = board.squares_of(side).flat_map(|sq| capture_steps(board, sq)).collect();
    if !caps.is_empty() { return caps; }
    board.squares_of(side).flat_map(|sq| simple_moves_from(board, sq)).collect()
}
