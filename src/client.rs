//! Client-side adapter for renderers. The local board mirror and the turn flag are
//! display hints; the server re-validates everything.

use crate::board::{Board, Side, Square};
use crate::error::ProtocolError;
use crate::protocol::{Coords, Message};
use crate::rules::{Snapshot, TurnController};
use crate::transport::LineSender;
use log::warn;
use std::io;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    Connected,
    Waiting,
    Started(Side),
    YourTurn,
    MoveAccepted,
    MoveRejected,
    /// A move was played by `side` (possibly us); the mirror has been updated.
    Moved { side: Option<Side>, coords: Coords },
    GameOver(String),
    ServerError(String),
    Unexpected(&'static str),
}

pub struct Client<S: LineSender> {
    sender: S,
    name: String,
    color: Option<Side>,
    my_turn: bool,
    mirror: TurnController,
    finished: bool,
}

impl<S: LineSender> Client<S> {
    /// Sends `CONNECT|name`.
    pub fn connect(name: &str, mut sender: S) -> io::Result<Self> {
        sender.send_line(&Message::Connect(name.to_string()).to_string())?;
        Ok(Self { sender, name: name.to_string(), color: None, my_turn: false, mirror: TurnController::new(), finished: false })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn color(&self) -> Option<Side> { self.color }
    pub fn is_my_turn(&self) -> bool { self.my_turn && !self.finished }
    pub fn is_finished(&self) -> bool { self.finished }
    pub fn board(&self) -> &Board { self.mirror.board() }
    pub fn snapshot(&self) -> Snapshot { self.mirror.snapshot() }

    /// Send a move request. Not filtered locally: the server decides.
    pub fn submit_move(&mut self, from: Square, to: Square) -> io::Result<()> {
        let coords = Coords::new(from.row() as i32, from.col() as i32, to.row() as i32, to.col() as i32);
        self.sender.send_line(&Message::Move(coords).to_string())
    }

    pub fn disconnect(&mut self) -> io::Result<()> {
        self.finished = true;
        self.sender.send_line(&Message::Disconnect.to_string())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<ClientEvent, ProtocolError> {
        Ok(match Message::parse(line)? {
            Message::Connected => ClientEvent::Connected,
            Message::Wait => ClientEvent::Waiting,
            Message::Start(side) => {
                self.color = Some(side);
                self.mirror = TurnController::new();
                ClientEvent::Started(side)
            }
            Message::YourTurn => { self.my_turn = true; ClientEvent::YourTurn }
            Message::MoveOk => { self.my_turn = false; ClientEvent::MoveAccepted }
            Message::MoveInvalid => ClientEvent::MoveRejected,
            Message::OpponentMove(coords) => {
                let side = self.mirror.side_to_act();
                match coords.squares().map(|(f, t)| self.mirror.submit(f, t)) {
                    Some(Ok(_)) => {}
                    other => warn!("mirror rejected relayed move {coords}: {other:?}"),
                }
                ClientEvent::Moved { side, coords }
            }
            Message::GameOver(text) => { self.finished = true; self.my_turn = false; ClientEvent::GameOver(text) }
            Message::Error(text) => ClientEvent::ServerError(text),
            other => ClientEvent::Unexpected(other.kind()),
        })
    }
}
