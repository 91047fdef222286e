//! Terminal chat client for the Hanare room-code chat relay.

mod command;
mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod state;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
