//! Entity 定義
//!
//! - `Room`: ルームコードで識別されるチャットルーム
//! - `Session`: 接続ごとの所属ルーム・表示名・管理者フラグ

use std::collections::HashMap;

use super::value_object::{ConnectionId, DisplayName, MessageText, RoomCode, Timestamp};

/// チャットルーム
///
/// メンバーが 0 人になったルームは Repository から即座に削除されます。
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub code: RoomCode,
    /// ルーム作成者の接続 ID
    pub admin: ConnectionId,
    /// 接続 ID → 表示名
    pub members: HashMap<ConnectionId, DisplayName>,
    pub created_at: Timestamp,
}

impl Room {
    /// 作成者 1 人だけが参加しているルームを作成
    pub fn new(
        code: RoomCode,
        admin: ConnectionId,
        admin_name: DisplayName,
        created_at: Timestamp,
    ) -> Self {
        let mut members = HashMap::new();
        members.insert(admin.clone(), admin_name);
        Self {
            code,
            admin,
            members,
            created_at,
        }
    }

    pub fn is_admin(&self, connection_id: &ConnectionId) -> bool {
        &self.admin == connection_id
    }

    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains_key(connection_id)
    }

    /// メンバーを追加する。既に参加済みなら `false` を返し何もしない。
    pub fn add_member(&mut self, connection_id: ConnectionId, name: DisplayName) -> bool {
        if self.is_member(&connection_id) {
            return false;
        }
        self.members.insert(connection_id, name);
        true
    }

    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.members.remove(connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.keys().cloned().collect()
    }
}

/// 接続ごとのセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub room_code: RoomCode,
    pub display_name: DisplayName,
    /// このルームの作成者である場合のみ true
    pub is_admin: bool,
}

impl Session {
    pub fn new(room_code: RoomCode, display_name: DisplayName, is_admin: bool) -> Self {
        Self {
            room_code,
            display_name,
            is_admin,
        }
    }
}

/// ルーム内にブロードキャストされるチャットメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub username: DisplayName,
    pub message: MessageText,
    pub is_admin: bool,
    pub timestamp: Timestamp,
}

/// Events delivered to room members.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    UserJoined { username: DisplayName },
    UserLeft { username: DisplayName },
    NewMessage(ChatMessage),
    RoomClosed,
}
