//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server answered in a way the client cannot continue with
    #[error("Protocol error: {0}")]
    Protocol(String),
}
