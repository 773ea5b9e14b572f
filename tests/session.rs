use damas::session::DISCONNECT_REASON;
use damas::transport::{memory_pipe, MemoryReceiver, MemorySender};
use damas::{Board, FinishReason, GameOutcome, GameSession, Piece, Side, SessionStatus, Square, TurnController, TurnState, WinReason};
use pretty_assertions::assert_eq;

fn sq(r: i32, c: i32) -> Square { Square::new(r, c).unwrap() }

struct Table {
    session: GameSession<MemorySender>,
    white: MemoryReceiver,
    black: MemoryReceiver,
}

fn table_with(game: TurnController) -> Table {
    let (w_tx, white) = memory_pipe();
    let (b_tx, black) = memory_pipe();
    let mut session = GameSession::with_game(7, "ana".into(), w_tx, game);
    session.attach("bia".into(), b_tx).unwrap();
    assert_eq!(white.drain(), vec!["START|WHITE", "YOUR_TURN"]);
    assert_eq!(black.drain(), vec!["START|BLACK"]);
    Table { session, white, black }
}

fn table() -> Table { table_with(TurnController::new()) }

#[test]
fn legal_move_is_relayed_to_both_peers() {
    let mut t = table();
    t.session.handle_line(Side::White, "MOVE|5,0,4,1");
    assert_eq!(t.white.drain(), vec!["MOVE_OK", "OPPONENT_MOVE|5,0,4,1"]);
    assert_eq!(t.black.drain(), vec!["OPPONENT_MOVE|5,0,4,1", "YOUR_TURN"]);
    assert_eq!(t.session.game().state(), TurnState::ToMove(Side::Black));
}

#[test]
fn out_of_turn_request_changes_nothing() {
    let mut t = table();
    t.session.handle_line(Side::Black, "MOVE|2,1,3,0");
    assert_eq!(t.black.drain(), vec!["ERROR|Não é a sua vez"]);
    assert!(t.white.drain().is_empty());
    assert_eq!(*t.session.game().board(), Board::startpos());
    assert_eq!(t.session.game().state(), TurnState::ToMove(Side::White));
}

#[test]
fn illegal_move_reported_to_sender_only_who_may_retry() {
    let mut t = table();
    t.session.handle_line(Side::White, "MOVE|5,0,3,2");
    assert_eq!(t.white.drain(), vec!["MOVE_INVALID"]);
    assert!(t.black.drain().is_empty());
    t.session.handle_line(Side::White, "MOVE|9,9,4,1");
    assert_eq!(t.white.drain(), vec!["MOVE_INVALID"]);
    t.session.handle_line(Side::White, "MOVE|5,2,4,3");
    assert_eq!(t.white.drain(), vec!["MOVE_OK", "OPPONENT_MOVE|5,2,4,3"]);
}

#[test]
fn malformed_message_keeps_session_open() {
    let mut t = table();
    for line in ["MOVE|1,2", "MOVE|a,b,c,d", "HELLO", ""] {
        t.session.handle_line(Side::White, line);
        assert_eq!(t.white.drain(), vec!["ERROR|Formato de mensagem inválido"], "line {line:?}");
    }
    t.session.handle_line(Side::White, "CONNECT|again");
    assert_eq!(t.white.drain(), vec!["ERROR|Mensagem inesperada"]);
    assert_eq!(t.session.status(), SessionStatus::InProgress);
}

#[test]
fn capture_chain_relayed_one_landing_at_a_time() {
    let mut b = Board::empty();
    for (r, c, p) in [(5, 0, Piece::man(Side::White)), (4, 1, Piece::man(Side::Black)), (2, 3, Piece::man(Side::Black)), (0, 7, Piece::man(Side::Black))] {
        b.set(sq(r, c), Some(p));
    }
    let mut t = table_with(TurnController::from_position(b, Side::White));

    t.session.handle_line(Side::White, "MOVE|5,0,3,2");
    assert_eq!(t.white.drain(), vec!["MOVE_OK", "OPPONENT_MOVE|5,0,3,2", "YOUR_TURN"]);
    assert_eq!(t.black.drain(), vec!["OPPONENT_MOVE|5,0,3,2"]);

    // Black may not slip in while White is locked
    t.session.handle_line(Side::Black, "MOVE|0,7,1,6");
    assert_eq!(t.black.drain(), vec!["ERROR|Não é a sua vez"]);

    t.session.handle_line(Side::White, "MOVE|3,2,1,4");
    assert_eq!(t.white.drain(), vec!["MOVE_OK", "OPPONENT_MOVE|3,2,1,4"]);
    assert_eq!(t.black.drain(), vec!["OPPONENT_MOVE|3,2,1,4", "YOUR_TURN"]);
}

#[test]
fn game_over_sent_to_both_and_session_finishes() {
    let mut b = Board::empty();
    b.set(sq(3, 2), Some(Piece::man(Side::White)));
    b.set(sq(2, 3), Some(Piece::man(Side::Black)));
    let mut t = table_with(TurnController::from_position(b, Side::White));
    t.session.handle_line(Side::White, "MOVE|3,2,1,4");
    assert_eq!(t.white.drain(), vec!["MOVE_OK", "OPPONENT_MOVE|3,2,1,4", "GAME_OVER|Brancas venceram!"]);
    assert_eq!(t.black.drain(), vec!["OPPONENT_MOVE|3,2,1,4", "GAME_OVER|Brancas venceram!"]);
    let outcome = GameOutcome { winner: Side::White, reason: WinReason::NoPieces };
    assert_eq!(t.session.status(), SessionStatus::Finished(FinishReason::GameOver(outcome)));
}

#[test]
fn session_starting_in_a_finished_position_reports_it() {
    let mut b = Board::empty();
    b.set(sq(6, 1), Some(Piece::man(Side::White)));
    for (r, c) in [(5, 0), (5, 2), (4, 3)] { b.set(sq(r, c), Some(Piece::man(Side::Black))); }
    let (w_tx, white) = memory_pipe();
    let (b_tx, black) = memory_pipe();
    let mut s = GameSession::with_game(1, "ana".into(), w_tx, TurnController::from_position(b, Side::White));
    s.attach("bia".into(), b_tx).unwrap();
    let msg = "GAME_OVER|Pretas venceram! (Brancas sem movimentos)";
    assert_eq!(white.drain(), vec!["START|WHITE", msg]);
    assert_eq!(black.drain(), vec!["START|BLACK", msg]);
    assert!(s.is_finished());
}

// Scenario: Black's connection drops mid-game.
#[test]
fn black_disconnect_forfeits_to_white() {
    let mut t = table();
    t.session.handle_line(Side::White, "MOVE|5,0,4,1");
    t.white.drain();
    t.black.drain();

    t.session.disconnect(Side::Black);
    assert_eq!(t.white.drain(), vec![format!("GAME_OVER|{DISCONNECT_REASON}")]);
    assert_eq!(t.session.status(), SessionStatus::Finished(FinishReason::Disconnect { winner: Some(Side::White) }));

    t.session.handle_line(Side::White, "MOVE|4,1,3,2");
    t.session.handle_line(Side::Black, "MOVE|2,1,3,0");
    assert!(t.white.drain().is_empty());
    assert!(t.black.drain().is_empty());
    // both connections were released
    assert!(t.white.recv_timeout(std::time::Duration::from_millis(10)).is_none());
}

#[test]
fn explicit_disconnect_message() {
    let mut t = table();
    t.session.handle_line(Side::White, "DISCONNECT");
    assert_eq!(t.black.drain(), vec!["GAME_OVER|Oponente desconectou"]);
    assert!(t.white.drain().is_empty());
    assert_eq!(t.session.status(), SessionStatus::Finished(FinishReason::Disconnect { winner: Some(Side::Black) }));
}

#[test]
fn waiting_session_rejects_moves_and_ends_without_winner() {
    let (w_tx, white) = memory_pipe();
    let mut s = GameSession::new(2, "ana".into(), w_tx);
    assert_eq!(s.status(), SessionStatus::WaitingForOpponent);
    s.handle_line(Side::White, "MOVE|5,0,4,1");
    assert_eq!(white.drain(), vec!["ERROR|Aguardando oponente"]);
    s.disconnect(Side::White);
    assert_eq!(s.status(), SessionStatus::Finished(FinishReason::Disconnect { winner: None }));
    let (b_tx, _black) = memory_pipe();
    assert!(s.attach("bia".into(), b_tx).is_err());
}
