use damas::{Board, Side, Snapshot, Square, TurnController, TurnState};
use pretty_assertions::assert_eq;

#[test]
fn snapshot_serializes_rows_and_state() {
    let g = TurnController::new();
    let snap = g.snapshot();
    assert_eq!(snap.rows, Board::startpos().rows());
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["rows"][0], " b b b b");
    assert_eq!(json["state"]["ToMove"], "White");
}

#[test]
fn snapshot_reloads_into_the_same_position() {
    let mut g = TurnController::new();
    g.submit(Square::new(5, 0).unwrap(), Square::new(4, 1).unwrap()).unwrap();
    let text = serde_json::to_string(&g.snapshot()).unwrap();
    let back: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back.state, TurnState::ToMove(Side::Black));
    let rows: Vec<&str> = back.rows.iter().map(String::as_str).collect();
    let rows: [&str; 8] = rows.try_into().unwrap();
    assert_eq!(&Board::from_layout(&rows).unwrap(), g.board());
}
