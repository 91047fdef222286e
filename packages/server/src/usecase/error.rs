//! UseCase layer errors.

use thiserror::Error;

use crate::domain::ErrorKind;

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("Connection is already in room '{0}'")]
    AlreadyInRoom(String),
}

impl CreateRoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyInRoom(_) => ErrorKind::AlreadyMember,
        }
    }

    /// クライアントに返すメッセージ
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::AlreadyInRoom(_) => "Already in a room",
        }
    }
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Invalid room code format: '{0}'")]
    InvalidFormat(String),

    #[error("Room '{0}' not found")]
    NotFound(String),

    #[error("Already a member of room '{0}'")]
    AlreadyMember(String),

    #[error("Connection is already in room '{0}'")]
    AlreadyInRoom(String),
}

impl JoinRoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyMember(_) | Self::AlreadyInRoom(_) => ErrorKind::AlreadyMember,
        }
    }

    /// クライアントに返すメッセージ
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "Invalid room code format",
            Self::NotFound(_) => "Room not found. Check the code and try again.",
            Self::AlreadyMember(_) => "You're already in this room!",
            Self::AlreadyInRoom(_) => "Already in a room",
        }
    }
}

/// メッセージ送信のエラー（クライアントには返さない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Connection is not in a room")]
    NotInRoom,

    #[error("Room '{0}' no longer exists")]
    RoomNotFound(String),
}

impl SendMessageError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}

/// ルームクローズのエラー（クライアントには返さない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseRoomError {
    #[error("Connection is not in a room")]
    NotInRoom,

    #[error("Invalid room code format: '{0}'")]
    InvalidFormat(String),

    #[error("Connection is not the admin of room '{0}'")]
    Unauthorized(String),
}

impl CloseRoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInRoom => ErrorKind::NotFound,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_room_error_kinds() {
        // テスト項目: 参加エラーがクライアント向けのエラー種別に対応付けられる
        // given (前提条件):
        let cases = [
            (
                JoinRoomError::InvalidFormat("abc".to_string()),
                ErrorKind::InvalidFormat,
            ),
            (
                JoinRoomError::NotFound("ZZZZZZ".to_string()),
                ErrorKind::NotFound,
            ),
            (
                JoinRoomError::AlreadyMember("ABC123".to_string()),
                ErrorKind::AlreadyMember,
            ),
            (
                JoinRoomError::AlreadyInRoom("ABC123".to_string()),
                ErrorKind::AlreadyMember,
            ),
        ];

        for (error, expected) in cases {
            // when (操作):
            let kind = error.kind();

            // then (期待する結果):
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn test_client_message_does_not_leak_room_code() {
        // テスト項目: クライアント向けメッセージにルームコードは含まれない
        // given (前提条件):
        let error = JoinRoomError::NotFound("SECRET".to_string());

        // when (操作):
        let message = error.client_message();

        // then (期待する結果):
        assert!(!message.contains("SECRET"));
        assert_eq!(message, "Room not found. Check the code and try again.");
    }
}
