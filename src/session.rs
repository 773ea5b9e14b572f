use crate::board::Side;
use crate::error::{IllegalMove, SessionError};
use crate::protocol::{Coords, Message};
use crate::rules::{GameOutcome, TurnController, TurnState};
use crate::transport::LineSender;
use log::{debug, info, warn};

pub const DISCONNECT_REASON: &str = "Oponente desconectou";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishReason {
    GameOver(GameOutcome),
    /// A peer left. `winner` is the survivor, if the game had started.
    Disconnect { winner: Option<Side> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    WaitingForOpponent,
    InProgress,
    Finished(FinishReason),
}

struct Peer<S> {
    name: String,
    sender: S,
}

/// One match between two peers. The first peer plays White, the second Black.
///
/// Every mutation goes through `&mut self`, so whoever owns the session (one actor
/// thread in the server) serializes moves from both peers.
pub struct GameSession<S: LineSender> {
    room: u64,
    white: Option<Peer<S>>,
    black: Option<Peer<S>>,
    game: TurnController,
    status: SessionStatus,
    lost: Option<Side>,
}

impl<S: LineSender> GameSession<S> {
    pub fn new(room: u64, name: String, sender: S) -> Self {
        Self::with_game(room, name, sender, TurnController::new())
    }

    pub fn with_game(room: u64, name: String, sender: S, game: TurnController) -> Self {
        info!("[room {room}] {name} waiting for an opponent");
        Self {
            room,
            white: Some(Peer { name, sender }),
            black: None,
            game,
            status: SessionStatus::WaitingForOpponent,
            lost: None,
        }
    }

    pub fn room(&self) -> u64 { self.room }
    pub fn status(&self) -> SessionStatus { self.status }
    pub fn game(&self) -> &TurnController { &self.game }
    pub fn is_finished(&self) -> bool { matches!(self.status, SessionStatus::Finished(_)) }

    pub fn player_name(&self, side: Side) -> Option<&str> {
        self.peer(side).map(|p| p.name.as_str())
    }

    /// Seat the second peer as Black and start the game.
    pub fn attach(&mut self, name: String, sender: S) -> Result<(), SessionError> {
        if self.status != SessionStatus::WaitingForOpponent { return Err(SessionError::NotInProgress); }
        info!("[room {}] game started: {} (white) vs {} (black)", self.room, self.player_name(Side::White).unwrap_or("?"), name);
        self.black = Some(Peer { name, sender });
        self.status = SessionStatus::InProgress;
        self.send(Side::White, &Message::Start(Side::White));
        self.send(Side::Black, &Message::Start(Side::Black));
        self.announce(self.game.state());
        self.settle();
        Ok(())
    }

    /// Process one raw line from `side`'s connection.
    pub fn handle_line(&mut self, side: Side, line: &str) {
        if self.is_finished() { return; }
        match Message::parse(line) {
            Ok(msg) => {
                if let Err(e) = self.handle_message(side, msg) {
                    debug!("[room {}] {side:?}: {e}", self.room);
                    self.send(side, &Message::Error(rejection_text(&e).to_string()));
                }
            }
            Err(e) => {
                warn!("[room {}] malformed line from {side:?} '{line}': {e}", self.room);
                self.send(side, &Message::Error("Formato de mensagem inválido".into()));
            }
        }
        self.settle();
    }

    fn handle_message(&mut self, side: Side, msg: Message) -> Result<(), SessionError> {
        match msg {
            Message::Move(coords) => self.handle_move(side, coords),
            Message::Disconnect => { self.disconnect(side); Ok(()) }
            other => Err(SessionError::Unexpected(other.kind())),
        }
    }

    fn handle_move(&mut self, side: Side, coords: Coords) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress { return Err(SessionError::NotInProgress); }
        if self.game.side_to_act() != Some(side) { return Err(SessionError::OutOfTurn(side)); }
        let result = match coords.squares() {
            Some((from, to)) => self.game.submit(from, to),
            None => Err(IllegalMove::OffBoard),
        };
        match result {
            Ok(outcome) => {
                debug!("[room {}] {side:?} played {}", self.room, outcome.mv);
                self.send(side, &Message::MoveOk);
                let relay = Message::OpponentMove(Coords::from(outcome.mv));
                self.broadcast(&relay);
                self.announce(outcome.state);
            }
            Err(e) => {
                debug!("[room {}] {side:?} illegal move {coords}: {e}", self.room);
                self.send(side, &Message::MoveInvalid);
            }
        }
        Ok(())
    }

    fn announce(&mut self, state: TurnState) {
        match state {
            TurnState::ToMove(next) | TurnState::ContinuationLocked(next, _) => self.send(next, &Message::YourTurn),
            TurnState::GameOver(outcome) => {
                info!("[room {}] game over: {outcome}", self.room);
                self.broadcast(&Message::GameOver(outcome.to_string()));
                self.finish(FinishReason::GameOver(outcome));
            }
        }
    }

    /// `side`'s connection closed or it sent DISCONNECT. The other peer wins by forfeit.
    pub fn disconnect(&mut self, side: Side) {
        if self.is_finished() { return; }
        info!("[room {}] {side:?} disconnected", self.room);
        drop(self.peer_slot(side).take());
        let winner = match self.status {
            SessionStatus::InProgress => {
                self.send(side.other(), &Message::GameOver(DISCONNECT_REASON.into()));
                Some(side.other())
            }
            _ => None,
        };
        self.finish(FinishReason::Disconnect { winner });
    }

    fn finish(&mut self, reason: FinishReason) {
        self.status = SessionStatus::Finished(reason);
        self.white = None;
        self.black = None;
        info!("[room {}] closed", self.room);
    }

    // A failed write counts as a disconnect of that peer once the current event is done.
    fn settle(&mut self) {
        if let Some(side) = self.lost.take() { self.disconnect(side); }
    }

    fn broadcast(&mut self, msg: &Message) {
        self.send(Side::White, msg);
        self.send(Side::Black, msg);
    }

    fn send(&mut self, side: Side, msg: &Message) {
        let room = self.room;
        let Some(peer) = self.peer_slot(side).as_mut() else { return };
        if let Err(e) = peer.sender.send_line(&msg.to_string()) {
            warn!("[room {room}] write to {} failed: {e}", peer.name);
            self.lost.get_or_insert(side);
        }
    }

    fn peer(&self, side: Side) -> Option<&Peer<S>> {
        match side { Side::White => self.white.as_ref(), Side::Black => self.black.as_ref() }
    }

    fn peer_slot(&mut self, side: Side) -> &mut Option<Peer<S>> {
        match side { Side::White => &mut self.white, Side::Black => &mut self.black }
    }
}

fn rejection_text(e: &SessionError) -> &'static str {
    match e {
        SessionError::OutOfTurn(_) => "Não é a sua vez",
        SessionError::NotInProgress => "Aguardando oponente",
        SessionError::Unexpected(_) => "Mensagem inesperada",
    }
}
