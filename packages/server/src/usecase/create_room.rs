//! UseCase: ルーム作成処理
//!
//! 未参加（Unjoined）の接続がルームを作成し、その管理者として参加します。

use std::sync::Arc;

use hanare_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayNameFactory, RoomRepository, Session, SessionRepository, Timestamp,
};

use super::{JoinedRoom, error::CreateRoomError};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            clock,
        }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedRoom)` - 生成されたルームコードと作成者の表示名
    /// * `Err(CreateRoomError::AlreadyInRoom)` - 既にいずれかのルームに参加している
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<JoinedRoom, CreateRoomError> {
        if let Some(session) = self.session_repository.get_session(&connection_id).await {
            return Err(CreateRoomError::AlreadyInRoom(
                session.room_code.into_string(),
            ));
        }

        let username = DisplayNameFactory::generate(&mut rand::rng());
        let created_at = Timestamp::new(self.clock.now_millis());
        let room_code = self
            .room_repository
            .create_room(connection_id.clone(), username.clone(), created_at)
            .await;

        self.session_repository
            .open_session(
                connection_id.clone(),
                Session::new(room_code.clone(), username.clone(), true),
            )
            .await;

        tracing::info!(
            "Room '{}' created by '{}' ({})",
            room_code,
            connection_id,
            username
        );

        Ok(JoinedRoom {
            room_code,
            username,
        })
    }
}
