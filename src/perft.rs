use crate::rules::TurnController;
use rayon::prelude::*;

// Counts submitted steps, so each jump of a chain is its own ply.
pub fn perft(game: &TurnController, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for m in game.legal_moves() {
        let mut child = game.clone();
        if child.submit(m.from, m.to).is_ok() { nodes += perft(&child, depth - 1); }
    }
    nodes
}

// Root-split over rayon's current pool
pub fn perft_parallel(game: &TurnController, depth: u32) -> u64 {
    if depth <= 1 { return perft(game, depth); }
    game.legal_moves().par_iter().map(|m| {
        let mut child = game.clone();
        match child.submit(m.from, m.to) { Ok(_) => perft(&child, depth - 1), Err(_) => 0 }
    }).sum()
}
