use anyhow::Result;
use clap::Parser;
use damas::config::ServerConfig;
use damas::server::Server;

#[derive(Parser, Debug)]
#[command(author, version, about = "Brazilian checkers game server", long_about = None)]
struct Args {
    /// Address to bind (overrides DAMAS_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// TCP port (overrides DAMAS_PORT)
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(bind) = args.bind { config.bind = bind; }
    if let Some(port) = args.port { config.port = port; }

    let server = Server::bind(&config)?;
    println!("Damas server listening on {}", server.local_addr()?);
    server.run()
}
