//! UseCase テスト用のフィクスチャ

use std::sync::Arc;

use hanare_shared::time::{Clock, FixedClock};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher, RoomRepository, SessionRepository},
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
};

pub const FIXED_NOW: i64 = 1_700_000_000_000;

/// インメモリのレジストリと WebSocketMessagePusher を持つテスト環境
pub struct TestContext {
    pub room_repository: Arc<InMemoryRoomRepository>,
    pub session_repository: Arc<InMemorySessionRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<dyn Clock>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            room_repository: Arc::new(InMemoryRoomRepository::new()),
            session_repository: Arc::new(InMemorySessionRepository::new()),
            message_pusher: Arc::new(WebSocketMessagePusher::default()),
            clock: Arc::new(FixedClock::new(FIXED_NOW)),
        }
    }

    pub fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.session_repository.clone()
    }

    pub fn pusher(&self) -> Arc<dyn MessagePusher> {
        self.message_pusher.clone()
    }

    /// クライアントを接続し、受信用のチャンネルを返す
    pub async fn connect(&self, id: &str) -> (ConnectionId, Inbox) {
        let connection_id = connection(id);
        let (tx, rx) = mpsc::unbounded_channel();
        self.message_pusher
            .register_client(connection_id.clone(), tx)
            .await;
        (connection_id, Inbox(rx))
    }
}

/// クライアントが受信したメッセージ
pub struct Inbox(mpsc::UnboundedReceiver<String>);

impl Inbox {
    /// 現時点で届いている全てのメッセージを取り出す
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(text) = self.0.try_recv() {
            messages.push(serde_json::from_str(&text).expect("server sent invalid JSON"));
        }
        messages
    }
}

pub fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}
