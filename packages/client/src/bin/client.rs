//! Terminal chat client for Hiroba.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice --room lobby
//! cargo run --bin hiroba-client -- -u bob -r lobby --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use hiroba_client::run_client;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for Hiroba chat rooms", long_about = None)]
struct Args {
    /// Display name shown to other participants
    #[arg(short = 'u', long)]
    username: String,

    /// Room to join; created on first join
    #[arg(short = 'r', long)]
    room: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.username, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
