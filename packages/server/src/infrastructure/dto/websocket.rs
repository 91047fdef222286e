//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `type` (kebab-case) with camelCase fields:
//!
//! ```text
//! {"type":"join-room","roomCode":"x7k2qp"}
//! {"type":"reply","request":"join-room","status":"success","roomCode":"X7K2QP","username":"Red-Lion-Apple"}
//! {"type":"new-message","username":"Red-Lion-Apple","message":"hello","isAdmin":false,"timestamp":1700000000000}
//! ```

use serde::{Deserialize, Serialize};

/// Client → server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom,
    JoinRoom { room_code: String },
    SendMessage { message: String },
    CloseRoom { room_code: String },
    LeaveRoom,
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Reply to a request/reply event (`create-room`, `join-room`)
    Reply(ReplyMessage),
    UserJoined {
        username: String,
    },
    UserLeft {
        username: String,
    },
    NewMessage {
        username: String,
        message: String,
        is_admin: bool,
        timestamp: i64,
    },
    RoomClosed,
}

/// Events that expect a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    CreateRoom,
    JoinRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
}

/// Machine-readable error code carried by error replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    InvalidFormat,
    NotFound,
    AlreadyMember,
    Unauthorized,
    Internal,
}

/// Reply payload
///
/// On success `roomCode` and `username` are set; on error `error` and `message` are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessage {
    pub request: RequestKind,
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReplyMessage {
    pub fn success(request: RequestKind, room_code: String, username: String) -> Self {
        Self {
            request,
            status: ReplyStatus::Success,
            room_code: Some(room_code),
            username: Some(username),
            error: None,
            message: None,
        }
    }

    pub fn error(request: RequestKind, error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            request,
            status: ReplyStatus::Error,
            room_code: None,
            username: None,
            error: Some(error),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }
}
