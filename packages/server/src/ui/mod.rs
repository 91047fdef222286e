//! UI layer: Axum router, handlers and server lifecycle.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerConfig, ServerError};
pub use state::AppState;
