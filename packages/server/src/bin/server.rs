//! Hanare room-code chat relay server.
//!
//! Clients create a room, share its 6-character code, and chat with everyone who joins.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanare-server
//! cargo run --bin hanare-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hanare_server::ui::{AppState, Server, ServerConfig};
use hanare_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hanare-server")]
#[command(about = "Room-code chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Origin allowed by CORS
    #[arg(long, default_value = "http://localhost:3000")]
    allowed_origin: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            allowed_origin: args.allowed_origin,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(&[env!("CARGO_CRATE_NAME"), "tower_http"], &args.log_level);

    let config = ServerConfig::from(args);
    tracing::debug!("Server config: {:?}", config);

    let state = Arc::new(AppState::in_memory(Arc::new(SystemClock)));
    let server = Server::new(state, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
