//! Hanare server: a room-code chat relay over WebSocket.
//!
//! Layers:
//!
//! - `domain`: rooms, sessions, value objects and the traits the use cases depend on
//! - `infrastructure`: in-memory registries, the WebSocket pusher and wire DTOs
//! - `usecase`: one use case per client event
//! - `ui`: Axum router, WebSocket / HTTP handlers and the server runner

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
