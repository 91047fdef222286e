//! Value Object 定義
//!
//! ドメインで扱うプリミティブ値をラップし、生成時に不変条件を検証します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Room code length
pub const ROOM_CODE_LENGTH: usize = 6;

/// Characters a room code is drawn from (26 letters + 10 digits)
pub const ROOM_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// ルームコード（6 文字の英大文字・数字）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// 正規化済みの文字列から RoomCode を生成
    ///
    /// 長さが 6 でない、またはアルファベット外の文字を含む場合はエラー。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == ROOM_CODE_LENGTH
            && value.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(ValueObjectError::InvalidRoomCode(value));
        }
        Ok(Self(value))
    }

    /// ユーザー入力を正規化して RoomCode を生成
    ///
    /// 大文字化した後、英数字以外の文字を全て取り除きます。
    /// 正規化後の長さが 6 でなければ `InvalidRoomCode`。
    pub fn normalize(raw: &str) -> Result<Self, ValueObjectError> {
        Self::new(normalize_room_code_input(raw))
    }

    /// Factory が生成したコード（アルファベット・長さは生成側で保証済み）
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert_eq!(value.len(), ROOM_CODE_LENGTH);
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uppercase the input and keep only `A-Z0-9`.
pub fn normalize_room_code_input(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// 接続 ID（WebSocket 接続ごとにサーバーが払い出す）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    /// ランダムな UUID v4 から新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 表示名（例: `Red-Lion-Apple`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        Ok(Self(value))
    }

    pub(crate) fn from_generated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文（前後の空白は取り除かれる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
