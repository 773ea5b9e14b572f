use anyhow::{bail, Result};
use damas::perft::{perft, perft_parallel};
use damas::{Board, Side, TurnController};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the damas move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Eight board rows separated by '/', or "startpos"
    #[arg(value_name = "POSITION", default_value = "startpos")]
    position: String,
    /// Side to move: white or black
    #[arg(long, default_value = "white")]
    side: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn parse_game(args: &Args) -> Result<TurnController> {
    let side = match args.side.to_lowercase().as_str() {
        "w" | "white" => Side::White,
        "b" | "black" => Side::Black,
        other => bail!("invalid side '{other}': use white or black"),
    };
    if args.position == "startpos" { return Ok(TurnController::from_position(Board::startpos(), side)); }
    let rows: Vec<&str> = args.position.split('/').collect();
    let Ok(rows) = <[&str; 8]>::try_from(rows) else { bail!("expected 8 rows separated by '/'") };
    Ok(TurnController::from_position(Board::from_layout(&rows)?, side))
}

fn main() -> Result<()> {
    use clap::Parser;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let game = parse_game(&args)?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&game, args.depth) } else { perft_parallel(&game, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
