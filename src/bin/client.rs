use anyhow::{Context, Result};
use clap::Parser;
use damas::client::{Client, ClientEvent};
use damas::config::DEFAULT_PORT;
use damas::transport::{split_tcp, LineReceiver};
use damas::Square;
use std::io::{self, BufRead, Write};
use std::net::TcpStream;
use std::sync::mpsc::channel;
use std::thread;

#[derive(Parser, Debug)]
#[command(name = "client", about = "Play Brazilian checkers against a remote opponent")]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Player name
    #[arg(long, default_value = "Jogador")]
    name: String,
    /// Print the board as JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

enum Input {
    Server(String),
    ServerClosed,
    User(String),
}

fn parse_squares(line: &str) -> Option<(Square, Square)> {
    let v: Vec<i32> = line.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty()).filter_map(|s| s.parse().ok()).collect();
    if v.len() != 4 { return None; }
    Some((Square::new(v[0], v[1])?, Square::new(v[2], v[3])?))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stream = TcpStream::connect((args.host.as_str(), args.port)).with_context(|| format!("connecting to {}:{}", args.host, args.port))?;
    let (sender, mut receiver) = split_tcp(stream)?;
    let mut client = Client::connect(&args.name, sender)?;

    let (tx, rx) = channel();
    let net_tx = tx.clone();
    thread::spawn(move || {
        while let Ok(Some(line)) = receiver.recv_line() {
            if net_tx.send(Input::Server(line)).is_err() { return; }
        }
        let _ = net_tx.send(Input::ServerClosed);
    });
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::User(line)).is_err() { break; }
        }
    });

    let render = |client: &Client<_>| -> Result<()> {
        if args.json { println!("{}", serde_json::to_string(&client.snapshot())?); } else { println!("\n{}", client.board()); }
        Ok(())
    };

    for input in rx {
        match input {
            Input::Server(line) => match client.handle_line(&line) {
                Ok(ClientEvent::Connected) => println!("Conectado como {}", client.name()),
                Ok(ClientEvent::Waiting) => println!("Aguardando oponente..."),
                Ok(ClientEvent::Started(side)) => { println!("Você joga com as {side}"); render(&client)?; }
                Ok(ClientEvent::YourTurn) => { print!("Sua vez (r1 c1 r2 c2): "); io::stdout().flush()?; }
                Ok(ClientEvent::MoveAccepted) => {}
                Ok(ClientEvent::MoveRejected) => println!("Movimento inválido. Tente novamente."),
                Ok(ClientEvent::Moved { .. }) => render(&client)?,
                Ok(ClientEvent::GameOver(text)) => { println!("Fim de jogo: {text}"); break; }
                Ok(ClientEvent::ServerError(text)) => println!("Erro: {text}"),
                Ok(ClientEvent::Unexpected(kind)) => println!("Mensagem inesperada: {kind}"),
                Err(e) => println!("Mensagem inválida do servidor: {e}"),
            },
            Input::ServerClosed => { println!("Conexão encerrada pelo servidor"); break; }
            Input::User(line) => {
                let line = line.trim();
                if line == "quit" { client.disconnect()?; break; }
                match parse_squares(line) {
                    Some((from, to)) => client.submit_move(from, to)?,
                    None => println!("Formato: r1 c1 r2 c2 (0-7)"),
                }
            }
        }
    }
    Ok(())
}
