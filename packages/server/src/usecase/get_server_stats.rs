//! UseCase: サーバー統計の取得
//!
//! アクティブなルーム数とセッション数だけを返します。ルームコードは公開しません。

use std::sync::Arc;

use crate::domain::{RoomRepository, SessionRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    pub active_rooms: usize,
    pub active_sessions: usize,
}

pub struct GetServerStatsUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl GetServerStatsUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
        }
    }

    pub async fn execute(&self) -> ServerStats {
        ServerStats {
            active_rooms: self.room_repository.count_rooms().await,
            active_sessions: self.session_repository.count_sessions().await,
        }
    }
}
