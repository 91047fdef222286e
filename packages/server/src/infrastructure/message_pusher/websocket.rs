//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - ドメインイベントを JSON に変換してクライアントへ送信（broadcast）
//!
//! join / create の応答は接続ごとのチャンネルへ UI 層が直接書き込むため、ここは経由しません。
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent},
    infrastructure::dto::conversion::room_event_to_json,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.broadcast(vec![connection_id], &RoomEvent::RoomClosed).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        room_event_to_json(event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push message to client '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to client '{}'", target);
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的なメッセージ送信機能
    // - broadcast: 複数クライアントへの送信
    // - エラーハンドリング（存在しないクライアント）
    //
    // 【どのようなシナリオをテストするか】
    // 1. broadcast の成功ケース（複数クライアント）
    // 2. broadcast の部分失敗ケース（一部のクライアントが存在しない）
    // 3. 登録解除後は送信されない
    // ========================================

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn user_joined(name: &str) -> RoomEvent {
        RoomEvent::UserJoined {
            username: DisplayName::new(name.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにイベントをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(connection("alice"), tx1).await;
        pusher.register_client(connection("bob"), tx2).await;

        // when (操作):
        let targets = vec![connection("alice"), connection("bob")];
        let result = pusher
            .broadcast(targets, &user_joined("Red-Lion-Apple"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let expected = r#"{"type":"user-joined","username":"Red-Lion-Apple"}"#.to_string();
        assert_eq!(rx1.recv().await, Some(expected.clone()));
        assert_eq!(rx2.recv().await, Some(expected));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: ブロードキャスト時、一部のクライアントが存在しなくても成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_client(connection("alice"), tx1).await;

        // when (操作):
        let targets = vec![connection("alice"), connection("nonexistent")];
        let result = pusher.broadcast(targets, &RoomEvent::RoomClosed).await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert_eq!(
            rx1.recv().await,
            Some(r#"{"type":"room-closed"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        // テスト項目: 登録解除されたクライアントには送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(connection("alice"), tx).await;
        pusher.unregister_client(&connection("alice")).await;

        // when (操作):
        let result = pusher
            .broadcast(vec![connection("alice")], &RoomEvent::RoomClosed)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        // sender は破棄されているのでチャンネルは閉じている
        assert_eq!(rx.recv().await, None);
    }
}
