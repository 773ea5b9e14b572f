//! Accept loop, handshake and pairing. Each session runs on its own actor thread and
//! each connection gets a reader thread that forwards lines to that actor.

use crate::board::Side;
use crate::config::ServerConfig;
use crate::protocol::Message;
use crate::session::GameSession;
use crate::transport::{split_tcp, LineReceiver, LineSender, TcpLineReceiver, TcpLineSender};
use anyhow::{Context, Result};
use log::{error, info, warn};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

pub enum SessionEvent<S, R> {
    Attach { name: String, sender: S, receiver: R },
    Line { side: Side, line: String },
    Closed { side: Side },
}

struct WaitingRoom<S, R> {
    room: u64,
    events: Sender<SessionEvent<S, R>>,
}

/// Pairs incoming players two by two.
pub struct Lobby<S, R> {
    waiting: Mutex<Option<WaitingRoom<S, R>>>,
    next_room: AtomicU64,
}

impl<S, R> Default for Lobby<S, R> {
    fn default() -> Self { Self { waiting: Mutex::new(None), next_room: AtomicU64::new(1) } }
}

impl<S, R> Lobby<S, R>
where
    S: LineSender + 'static,
    R: LineReceiver + 'static,
{
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    /// Seat a player who completed the handshake: join the waiting room or open a new one.
    pub fn join(self: &Arc<Self>, name: String, sender: S, receiver: R) {
        let mut ev = SessionEvent::Attach { name, sender, receiver };
        let mut told_to_wait = false;
        loop {
            let mut slot = match self.waiting.lock() { Ok(g) => g, Err(p) => p.into_inner() };
            if let Some(room) = slot.take() {
                match room.events.send(ev) {
                    Ok(()) => return,
                    // that room's actor already ended
                    Err(SendError(back)) => ev = back,
                }
            }
            if told_to_wait {
                let SessionEvent::Attach { name, sender, receiver } = ev else { return };
                let room = self.next_room.fetch_add(1, Ordering::Relaxed);
                let (tx, rx) = channel();
                *slot = Some(WaitingRoom { room, events: tx.clone() });
                drop(slot);
                let session = GameSession::new(room, name, sender);
                spawn_reader(room, Side::White, receiver, tx.clone());
                let lobby = Arc::clone(self);
                thread::spawn(move || lobby.run_session(session, tx, rx));
                return;
            }
            // The write may block, so it happens outside the lock; then look for a partner again.
            drop(slot);
            let SessionEvent::Attach { name, sender, .. } = &mut ev else { return };
            if let Err(e) = sender.send_line(&Message::Wait.to_string()) {
                warn!("{name} left before waiting: {e}");
                return;
            }
            told_to_wait = true;
        }
    }

    // Owns the session until it finishes; one event at a time regardless of which peer sent it.
    fn run_session(self: Arc<Self>, mut session: GameSession<S>, tx: Sender<SessionEvent<S, R>>, rx: Receiver<SessionEvent<S, R>>) {
        let room = session.room();
        while !session.is_finished() {
            let Ok(event) = rx.recv() else { break };
            match event {
                SessionEvent::Attach { name, sender, receiver } => {
                    if session.attach(name, sender).is_ok() { spawn_reader(room, Side::Black, receiver, tx.clone()); }
                }
                SessionEvent::Line { side, line } => session.handle_line(side, &line),
                SessionEvent::Closed { side } => session.disconnect(side),
            }
        }
        info!("[room {room}] session ended: {:?}", session.status());
        drop(session);

        // Stop new players from being routed here, then re-seat any that already were.
        let requeue: Vec<SessionEvent<S, R>> = {
            let mut slot = match self.waiting.lock() { Ok(g) => g, Err(p) => p.into_inner() };
            if slot.as_ref().map(|w| w.room) == Some(room) { *slot = None; }
            rx.try_iter().collect()
        };
        for ev in requeue {
            if let SessionEvent::Attach { name, sender, receiver } = ev { self.join(name, sender, receiver); }
        }
    }
}

fn spawn_reader<S, R>(room: u64, side: Side, mut receiver: R, events: Sender<SessionEvent<S, R>>)
where
    S: Send + 'static,
    R: LineReceiver + 'static,
{
    thread::spawn(move || loop {
        match receiver.recv_line() {
            Ok(Some(line)) => {
                if events.send(SessionEvent::Line { side, line }).is_err() { break; }
            }
            Ok(None) => { let _ = events.send(SessionEvent::Closed { side }); break; }
            Err(e) => {
                warn!("[room {room}] read from {side:?} failed: {e}");
                let _ = events.send(SessionEvent::Closed { side });
                break;
            }
        }
    });
}

/// First line must be `CONNECT|name`; anything else is answered with ERROR and the connection dropped.
pub fn handshake<S, R>(lobby: &Arc<Lobby<S, R>>, mut sender: S, mut receiver: R) -> Result<()>
where
    S: LineSender + 'static,
    R: LineReceiver + 'static,
{
    let first = receiver.recv_line().context("reading handshake")?;
    let name = match first.as_deref().map(Message::parse) {
        Some(Ok(Message::Connect(name))) => name,
        _ => {
            sender.send_line(&Message::Error("Mensagem de conexão inválida".into()).to_string())?;
            anyhow::bail!("invalid handshake: {:?}", first);
        }
    };
    sender.send_line(&Message::Connected.to_string())?;
    info!("player {name} connected");
    lobby.join(name, sender, receiver);
    Ok(())
}

pub struct Server {
    listener: TcpListener,
    lobby: Arc<Lobby<TcpLineSender, TcpLineReceiver>>,
}

impl Server {
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.addr()).with_context(|| format!("binding {}", config.addr()))?;
        Ok(Self { listener, lobby: Lobby::new() })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> { Ok(self.listener.local_addr()?) }

    pub fn run(&self) -> Result<()> {
        info!("listening on {}", self.local_addr()?);
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => { error!("accept failed: {e}"); continue; }
            };
            let peer = stream.peer_addr().map(|a| a.to_string()).unwrap_or_else(|_| "?".into());
            info!("connection from {peer}");
            let lobby = Arc::clone(&self.lobby);
            thread::spawn(move || {
                let result = split_tcp(stream).map_err(anyhow::Error::from).and_then(|(tx, rx)| handshake(&lobby, tx, rx));
                if let Err(e) = result { warn!("{peer}: {e:#}"); }
            });
        }
        Ok(())
    }
}
