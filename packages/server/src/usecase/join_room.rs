//! UseCase: ルーム参加処理
//!
//! ## 処理の流れ
//!
//! 1. 入力されたコードを正規化（形式エラーはレジストリを見る前に返す）
//! 2. 既存セッションの確認
//! 3. ルームへのメンバー登録
//! 4. セッション作成
//! 5. メンバーであることを再確認（登録とセッション作成の間にルームがクローズされた場合はロールバック）
//! 6. 他のメンバーへ `user-joined` を通知

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayNameFactory, MessagePusher, RepositoryError, RoomCode, RoomEvent,
    RoomRepository, Session, SessionRepository,
};

use super::{JoinedRoom, error::JoinRoomError};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `raw_code` - ユーザーが入力したままのルームコード（小文字・区切り文字を許容）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        raw_code: &str,
    ) -> Result<JoinedRoom, JoinRoomError> {
        let room_code = RoomCode::normalize(raw_code)
            .map_err(|_| JoinRoomError::InvalidFormat(raw_code.to_string()))?;

        if let Some(session) = self.session_repository.get_session(&connection_id).await {
            return Err(if session.room_code == room_code {
                JoinRoomError::AlreadyMember(room_code.into_string())
            } else {
                JoinRoomError::AlreadyInRoom(session.room_code.into_string())
            });
        }

        let username = DisplayNameFactory::generate(&mut rand::rng());
        self.room_repository
            .join_room(&room_code, connection_id.clone(), username.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(code) => JoinRoomError::NotFound(code),
                RepositoryError::AlreadyMember { room_code, .. } => {
                    JoinRoomError::AlreadyMember(room_code)
                }
            })?;

        self.session_repository
            .open_session(
                connection_id.clone(),
                Session::new(room_code.clone(), username.clone(), false),
            )
            .await;

        let members = self
            .room_repository
            .member_ids(&room_code)
            .await
            .filter(|members| members.contains(&connection_id));
        let Some(members) = members else {
            self.session_repository.close_session(&connection_id).await;
            tracing::warn!(
                "Room '{}' was closed while '{}' was joining, session rolled back",
                room_code,
                connection_id
            );
            return Err(JoinRoomError::NotFound(room_code.into_string()));
        };

        let others: Vec<ConnectionId> = members
            .into_iter()
            .filter(|id| id != &connection_id)
            .collect();
        let event = RoomEvent::UserJoined {
            username: username.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(others, &event).await {
            tracing::warn!("Failed to notify members of room '{}': {}", room_code, e);
        }

        tracing::info!(
            "Client '{}' ({}) joined room '{}'",
            connection_id,
            username,
            room_code
        );

        Ok(JoinedRoom {
            room_code,
            username,
        })
    }
}
