//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (client → server and server → client)
//! - `http`: HTTP API response DTOs
//! - `conversion`: domain ↔ DTO conversions

pub mod conversion;
pub mod http;
pub mod websocket;
