//! InMemory Session Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomCode, Session, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// 接続 ID → セッション
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn open_session(&self, connection_id: ConnectionId, session: Session) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(connection_id, session);
    }

    async fn get_session(&self, connection_id: &ConnectionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(connection_id).cloned()
    }

    async fn close_session(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(connection_id)
    }

    async fn close_session_in(
        &self,
        connection_id: &ConnectionId,
        room_code: &RoomCode,
    ) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        if sessions
            .get(connection_id)
            .is_some_and(|session| &session.room_code == room_code)
        {
            sessions.remove(connection_id)
        } else {
            None
        }
    }

    async fn count_sessions(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
