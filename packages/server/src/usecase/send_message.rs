//! UseCase: メッセージ送信処理
//!
//! 送信者を含むルームの全メンバーに `new-message` をブロードキャストします。
//! セッションが無い、またはルームが既に存在しない場合は何も送信しません。

use std::sync::Arc;

use hanare_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, MessageText, RoomEvent, RoomRepository,
    SessionRepository, Timestamp,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - メッセージ送信者の接続 ID
    /// * `raw_message` - 送信されたメッセージ（前後の空白は取り除かれる）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - ブロードキャスト対象の接続 ID リスト
    /// * `Err(SendMessageError)` - 送信者がルームに参加していない
    pub async fn execute(
        &self,
        from: &ConnectionId,
        raw_message: &str,
    ) -> Result<Vec<ConnectionId>, SendMessageError> {
        let session = self
            .session_repository
            .get_session(from)
            .await
            .ok_or(SendMessageError::NotInRoom)?;

        let targets = self
            .room_repository
            .member_ids(&session.room_code)
            .await
            .ok_or_else(|| SendMessageError::RoomNotFound(session.room_code.to_string()))?;

        let event = RoomEvent::NewMessage(ChatMessage {
            username: session.display_name,
            message: MessageText::new(raw_message),
            is_admin: session.is_admin,
            timestamp: Timestamp::new(self.clock.now_millis()),
        });

        if let Err(e) = self.message_pusher.broadcast(targets.clone(), &event).await {
            tracing::warn!(
                "Failed to broadcast message in room '{}': {}",
                session.room_code,
                e
            );
        }
        tracing::debug!(
            "Message from '{}' broadcast to {} member(s) of room '{}'",
            from,
            targets.len(),
            session.room_code
        );

        Ok(targets)
    }
}
