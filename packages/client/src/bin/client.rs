//! Terminal chat client for Hanare.
//!
//! Create a room and share its code, or join someone else's room by code.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanare-client
//! cargo run --bin hanare-client -- --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use hanare_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hanare-client")]
#[command(about = "Terminal client for the Hanare room-code chat relay", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(&[env!("CARGO_CRATE_NAME")], &args.log_level);

    if let Err(e) = hanare_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
