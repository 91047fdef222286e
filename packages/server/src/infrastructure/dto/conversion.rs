//! Conversion logic between DTOs and domain entities.

use crate::domain::{ErrorKind, RoomEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::UserJoined { username } => Self::UserJoined {
                username: username.as_str().to_string(),
            },
            RoomEvent::UserLeft { username } => Self::UserLeft {
                username: username.as_str().to_string(),
            },
            RoomEvent::NewMessage(chat) => Self::NewMessage {
                username: chat.username.as_str().to_string(),
                message: chat.message.as_str().to_string(),
                is_admin: chat.is_admin,
                timestamp: chat.timestamp.value(),
            },
            RoomEvent::RoomClosed => Self::RoomClosed,
        }
    }
}

impl From<ErrorKind> for dto::ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidFormat => Self::InvalidFormat,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::AlreadyMember => Self::AlreadyMember,
            ErrorKind::Unauthorized => Self::Unauthorized,
            ErrorKind::Internal => Self::Internal,
        }
    }
}

/// Serialize a room event into the JSON text frame sent to clients.
pub fn room_event_to_json(event: &RoomEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerMessage::from(event))
}
