use anyhow::Result;
use clap::Parser;
use damas::{Side, Square, TurnController, TurnState};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "console", about = "Two players, one terminal")]
struct Args {
    /// List legal moves before each prompt
    #[arg(long, default_value_t = false)]
    hints: bool,
}

fn side_label(side: Side) -> &'static str {
    match side { Side::White => "Brancas (w/W)", Side::Black => "Pretas (b/B)" }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut game = TurnController::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", game.board());
        let side = match game.state() {
            TurnState::GameOver(outcome) => { println!("Fim de jogo! {outcome}"); break; }
            TurnState::ContinuationLocked(side, sq) => { println!("{} devem continuar capturando com a peça em {sq}", side_label(side)); side }
            TurnState::ToMove(side) => side,
        };
        if args.hints {
            let hints: Vec<String> = game.legal_moves().iter().map(|m| m.to_string()).collect();
            println!("Movimentos: {}", hints.join(" "));
        }
        print!("Vez de {}. Digite movimento (ex: 5 0 4 1): ", side_label(side));
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim() == "quit" { break; }
        let v: Vec<i32> = line.split_whitespace().filter_map(|s| s.parse().ok()).collect();
        let squares = if v.len() == 4 { Square::new(v[0], v[1]).zip(Square::new(v[2], v[3])) } else { None };
        let Some((from, to)) = squares else { println!("Formato: r1 c1 r2 c2 (0-7)"); continue };
        match game.submit(from, to) {
            Ok(outcome) if outcome.promoted => println!("Peça promovida a dama em {to}!"),
            Ok(_) => {}
            Err(e) => println!("Movimento inválido: {e}. Tente novamente."),
        }
    }
    Ok(())
}
