//! Domain layer errors.

use thiserror::Error;

/// Value Object の生成に失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Invalid room code: '{0}'")]
    InvalidRoomCode(String),

    #[error("Connection ID must not be empty")]
    EmptyConnectionId,

    #[error("Display name must not be empty")]
    EmptyDisplayName,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Connection '{connection_id}' is already a member of room '{room_code}'")]
    AlreadyMember {
        room_code: String,
        connection_id: String,
    },
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Error categories visible to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed room code
    InvalidFormat,
    /// Room does not exist
    NotFound,
    /// Duplicate join attempt
    AlreadyMember,
    /// Non-admin close attempt
    Unauthorized,
    /// Unexpected fault
    Internal,
}
