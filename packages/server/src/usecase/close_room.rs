//! UseCase: ルームクローズ処理
//!
//! 管理者だけがルームをクローズできます。クローズに成功すると全メンバー（管理者を含む）に
//! `room-closed` を 1 回ずつ通知し、全メンバーのセッションを破棄します。
//! クローズ後に別のルームへ移ったメンバーのセッションは残します。
//! 管理者以外からの要求は何もせずに無視されます。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, RoomCode, RoomEvent, RoomRepository, SessionRepository,
};

use super::error::CloseRoomError;

/// ルームクローズのユースケース
pub struct CloseRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CloseRoomUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            message_pusher,
        }
    }

    /// ルームクローズを実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - `room-closed` を通知したメンバー
    /// * `Err(CloseRoomError)` - 要求は無視された
    pub async fn execute(
        &self,
        requester: &ConnectionId,
        room_code: &str,
    ) -> Result<Vec<ConnectionId>, CloseRoomError> {
        let session = self
            .session_repository
            .get_session(requester)
            .await
            .ok_or(CloseRoomError::NotInRoom)?;
        if !session.is_admin {
            return Err(CloseRoomError::Unauthorized(room_code.to_string()));
        }

        let code = RoomCode::new(room_code.to_string())
            .map_err(|_| CloseRoomError::InvalidFormat(room_code.to_string()))?;

        let room = self
            .room_repository
            .close_room(&code, requester)
            .await
            .ok_or_else(|| CloseRoomError::Unauthorized(code.to_string()))?;

        let members = room.member_ids();
        for member in &members {
            self.session_repository.close_session_in(member, &code).await;
        }
        if let Err(e) = self
            .message_pusher
            .broadcast(members.clone(), &RoomEvent::RoomClosed)
            .await
        {
            tracing::warn!("Failed to notify closure of room '{}': {}", code, e);
        }

        tracing::info!(
            "Room '{}' closed by '{}' ({} member(s) removed)",
            code,
            requester,
            members.len()
        );

        Ok(members)
    }
}
