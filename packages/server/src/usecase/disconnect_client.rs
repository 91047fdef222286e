//! UseCase: クライアント切断処理
//!
//! ルームに参加していればルームから退出させ（`user-left` 通知・空ルームの削除を含む）、
//! 最後に MessagePusher から送信チャンネルを登録解除します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::leave_room::{LeaveRoomUseCase, LeftRoom};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    leave_room: Arc<LeaveRoomUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(leave_room: Arc<LeaveRoomUseCase>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            leave_room,
            message_pusher,
        }
    }

    /// 切断処理を実行
    ///
    /// # Returns
    ///
    /// ルームに参加していた場合はそのルームの情報
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let left = self.leave_room.execute(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        tracing::info!("Client '{}' disconnected", connection_id);
        left
    }
}
