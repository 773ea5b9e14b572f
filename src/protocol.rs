//! Newline-delimited text protocol: each line is `TYPE` or `TYPE|PAYLOAD`.

use crate::board::{Move, Side, Square};
use crate::error::ProtocolError;
use std::fmt;

pub const SEPARATOR: char = '|';
pub const FIELD_SEPARATOR: char = ',';

/// Raw move coordinates as sent on the wire. They may lie off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coords {
    pub r1: i32,
    pub c1: i32,
    pub r2: i32,
    pub c2: i32,
}

impl Coords {
    pub fn new(r1: i32, c1: i32, r2: i32, c2: i32) -> Self { Self { r1, c1, r2, c2 } }

    pub fn squares(&self) -> Option<(Square, Square)> {
        Some((Square::new(self.r1, self.c1)?, Square::new(self.r2, self.c2)?))
    }

    fn parse(payload: &str) -> Result<Self, ProtocolError> {
        let parts: Vec<&str> = payload.split(FIELD_SEPARATOR).map(str::trim).collect();
        if parts.len() != 4 { return Err(ProtocolError::FieldCount(parts.len())); }
        let mut v = [0i32; 4];
        for (slot, p) in v.iter_mut().zip(&parts) {
            *slot = p.parse().map_err(|_| ProtocolError::NotAnInteger(p.to_string()))?;
        }
        Ok(Self::new(v[0], v[1], v[2], v[3]))
    }
}

impl From<Move> for Coords {
    fn from(m: Move) -> Self {
        Self::new(m.from.row() as i32, m.from.col() as i32, m.to.row() as i32, m.to.col() as i32)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r1, self.c1, self.r2, self.c2)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Connect(String),
    Connected,
    Wait,
    Start(Side),
    Move(Coords),
    MoveOk,
    MoveInvalid,
    OpponentMove(Coords),
    YourTurn,
    GameOver(String),
    Disconnect,
    Error(String),
}

impl Message {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() { return Err(ProtocolError::Empty); }
        let (kind, payload) = match line.split_once(SEPARATOR) {
            Some((k, p)) => (k.trim(), Some(p)),
            None => (line.trim(), None),
        };
        let need = |name: &'static str| payload.ok_or(ProtocolError::MissingPayload(name));
        Ok(match kind {
            "CONNECT" => Message::Connect(need("CONNECT")?.trim().to_string()),
            "CONNECTED" => Message::Connected,
            "WAIT" => Message::Wait,
            "START" => match need("START")?.trim() {
                "WHITE" => Message::Start(Side::White),
                "BLACK" => Message::Start(Side::Black),
                other => return Err(ProtocolError::UnknownColor(other.to_string())),
            },
            "MOVE" => Message::Move(Coords::parse(need("MOVE")?)?),
            "MOVE_OK" => Message::MoveOk,
            "MOVE_INVALID" => Message::MoveInvalid,
            "OPPONENT_MOVE" => Message::OpponentMove(Coords::parse(need("OPPONENT_MOVE")?)?),
            "YOUR_TURN" => Message::YourTurn,
            "GAME_OVER" => Message::GameOver(payload.unwrap_or_default().to_string()),
            "DISCONNECT" => Message::Disconnect,
            "ERROR" => Message::Error(payload.unwrap_or_default().to_string()),
            other => return Err(ProtocolError::UnknownType(other.to_string())),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::Connect(_) => "CONNECT",
            Message::Connected => "CONNECTED",
            Message::Wait => "WAIT",
            Message::Start(_) => "START",
            Message::Move(_) => "MOVE",
            Message::MoveOk => "MOVE_OK",
            Message::MoveInvalid => "MOVE_INVALID",
            Message::OpponentMove(_) => "OPPONENT_MOVE",
            Message::YourTurn => "YOUR_TURN",
            Message::GameOver(_) => "GAME_OVER",
            Message::Disconnect => "DISCONNECT",
            Message::Error(_) => "ERROR",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Message::Connect(name) => write!(f, "{kind}{SEPARATOR}{name}"),
            Message::Start(side) => write!(f, "{kind}{SEPARATOR}{}", side.wire_name()),
            Message::Move(c) | Message::OpponentMove(c) => write!(f, "{kind}{SEPARATOR}{c}"),
            Message::GameOver(text) | Message::Error(text) => write!(f, "{kind}{SEPARATOR}{text}"),
            _ => f.write_str(kind),
        }
    }
}
