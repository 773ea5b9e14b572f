use damas::search::{capture_steps, find_all_captures, find_capture_sequences_from};
use damas::{Board, Piece, Side, Square};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn sq(r: i32, c: i32) -> Square { Square::new(r, c).unwrap() }

const DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[test]
fn man_capture_iff_enemy_adjacent_and_landing_free() {
    for from in Square::dark_squares() {
        for (dr, dc) in DIRS {
            let Some(mid) = Square::new(from.row() as i32 + dr, from.col() as i32 + dc) else { continue };
            let land = Square::new(from.row() as i32 + 2 * dr, from.col() as i32 + 2 * dc);

            let mut b = Board::empty();
            b.set(from, Some(Piece::man(Side::White)));
            b.set(mid, Some(Piece::man(Side::Black)));
            let steps = capture_steps(&b, from);
            match land {
                Some(to) => {
                    assert_eq!(steps.len(), 1, "from {from} over {mid}");
                    assert_eq!((steps[0].to, steps[0].captured()), (to, Some(mid)));
                    // blocked landing
                    b.set(to, Some(Piece::man(Side::White)));
                    assert!(capture_steps(&b, from).is_empty());
                }
                None => assert!(steps.is_empty(), "from {from} over {mid} lands off the board"),
            }

            // never over an own piece
            let mut own = Board::empty();
            own.set(from, Some(Piece::man(Side::White)));
            own.set(mid, Some(Piece::man(Side::White)));
            assert!(capture_steps(&own, from).is_empty());
        }
    }
}

#[test]
fn king_capture_lands_anywhere_past_a_single_enemy() {
    for from in Square::dark_squares() {
        for (dr, dc) in DIRS {
            let ray: Vec<Square> = (1..8).map_while(|n| Square::new(from.row() as i32 + dr * n, from.col() as i32 + dc * n)).collect();
            for (i, &enemy) in ray.iter().enumerate() {
                let mut b = Board::empty();
                b.set(from, Some(Piece::king(Side::Black)));
                b.set(enemy, Some(Piece::man(Side::White)));
                let got: Vec<Square> = capture_steps(&b, from).iter().map(|m| m.to).collect();
                assert_eq!(got, ray[i + 1..].to_vec(), "king {from} enemy {enemy}");

                // a second piece right behind the enemy stops the jump
                if let Some(&behind) = ray.get(i + 1) {
                    b.set(behind, Some(Piece::man(Side::White)));
                    assert!(capture_steps(&b, from).is_empty());
                }
            }
        }
    }
}

#[test]
fn king_landings_stop_at_next_piece() {
    let mut b = Board::empty();
    b.set(sq(7, 0), Some(Piece::king(Side::White)));
    b.set(sq(3, 4), Some(Piece::man(Side::Black)));
    b.set(sq(0, 7), Some(Piece::man(Side::White)));
    let got: Vec<Square> = capture_steps(&b, sq(7, 0)).iter().map(|m| m.to).collect();
    assert_eq!(got, vec![sq(2, 5), sq(1, 6)]);
}

#[test]
fn king_chain_explores_every_landing() {
    let mut b = Board::empty();
    b.set(sq(7, 0), Some(Piece::king(Side::White)));
    b.set(sq(5, 2), Some(Piece::man(Side::Black)));
    b.set(sq(2, 5), Some(Piece::man(Side::Black)));
    let chains = find_capture_sequences_from(&b, sq(7, 0));
    assert_eq!(chains.len(), 4);
    for c in &chains {
        assert_eq!(c.len(), 2);
        let captured: BTreeSet<Square> = c.captured().collect();
        assert_eq!(captured, [sq(5, 2), sq(2, 5)].into_iter().collect());
    }
    let landings: BTreeSet<Square> = chains.iter().map(|c| c.landing()).collect();
    assert_eq!(landings, [sq(1, 6), sq(0, 7)].into_iter().collect());
}

#[test]
fn chains_of_different_length_are_all_reported() {
    let mut b = Board::empty();
    b.set(sq(5, 2), Some(Piece::man(Side::White)));
    b.set(sq(4, 1), Some(Piece::man(Side::Black)));
    b.set(sq(4, 3), Some(Piece::man(Side::Black)));
    b.set(sq(2, 3), Some(Piece::man(Side::Black)));
    let mut lens: Vec<(usize, Square)> = find_capture_sequences_from(&b, sq(5, 2)).iter().map(|c| (c.len(), c.landing())).collect();
    lens.sort();
    assert_eq!(lens, vec![(1, sq(3, 0)), (2, sq(1, 2))]);
}

#[test]
fn every_chain_is_connected_and_maximal() {
    let rows = [
        " . . . .",
        ". . . . ",
        " b . b .",
        ". . . . ",
        " b . b .",
        "w . . . ",
        " . . . .",
        ". . . . ",
    ];
    let b = Board::from_layout(&rows).unwrap();
    let chains = find_all_captures(&b, Side::White);
    assert!(!chains.is_empty());
    for c in &chains {
        for pair in c.moves().windows(2) { assert_eq!(pair[0].to, pair[1].from); }
        let mut after = b;
        for m in c.moves() { after.apply(m); }
        assert!(capture_steps(&after, c.landing()).is_empty(), "chain {c} is not maximal");
    }
}

#[test]
fn search_on_shared_board_from_many_threads() {
    let b = Board::from_layout(&[
        " . . . .",
        ". . . . ",
        " b . b .",
        ". . . . ",
        " b . b .",
        "w . . . ",
        " . . . .",
        ". . . . ",
    ])
    .unwrap();
    let expected = find_all_captures(&b, Side::White);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| find_all_captures(&b, Side::White))).collect();
        for h in handles { assert_eq!(h.join().unwrap(), expected); }
    });
}

#[test]
fn no_side_effects_on_input_board() {
    let b = Board::startpos();
    let copy = b;
    let _ = find_all_captures(&b, Side::White);
    let _ = find_all_captures(&b, Side::Black);
    assert_eq!(b, copy);
}
