//! UseCase: ルーム退出処理
//!
//! 接続は維持したままルームから抜けて Unjoined に戻ります。
//! 切断時のルーム側の後始末もこのユースケースで行います。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, MessagePusher, RoomCode, RoomEvent, RoomRepository,
    SessionRepository,
};

/// 退出したルームの情報
#[derive(Debug, Clone, PartialEq)]
pub struct LeftRoom {
    pub room_code: RoomCode,
    pub username: DisplayName,
    /// 退出によってルームが削除された（最後のメンバーだった）
    pub room_deleted: bool,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
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

    /// ルーム退出を実行
    ///
    /// セッションが無ければ何もせず `None` を返します。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let session = self.session_repository.get_session(connection_id).await?;

        let remaining = self
            .room_repository
            .remove_member(&session.room_code, connection_id)
            .await;
        self.session_repository.close_session(connection_id).await;

        if let Some(remaining) = &remaining {
            let event = RoomEvent::UserLeft {
                username: session.display_name.clone(),
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(remaining.clone(), &event)
                .await
            {
                tracing::warn!(
                    "Failed to notify members of room '{}': {}",
                    session.room_code,
                    e
                );
            }
        }

        tracing::info!(
            "Client '{}' ({}) left room '{}'",
            connection_id,
            session.display_name,
            session.room_code
        );

        Some(LeftRoom {
            room_code: session.room_code,
            username: session.display_name,
            room_deleted: remaining.is_none(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::dto::websocket::ServerMessage,
        usecase::{
            CreateRoomUseCase, JoinRoomUseCase,
            test_support::{TestContext, connection},
        },
    };

    fn leave_usecase(ctx: &TestContext) -> LeaveRoomUseCase {
        LeaveRoomUseCase::new(ctx.rooms(), ctx.sessions(), ctx.pusher())
    }

    #[tokio::test]
    async fn test_leave_room_notifies_remaining_members() {
        // テスト項目: 最後のメンバーでなければ残りのメンバーに user-left が届き、ルームは残る
        // given (前提条件):
        let ctx = TestContext::new();
        let (_alice, mut alice_inbox) = ctx.connect("alice").await;
        let (_bob, mut bob_inbox) = ctx.connect("bob").await;
        let created = CreateRoomUseCase::new(ctx.rooms(), ctx.sessions(), ctx.clock.clone())
            .execute(connection("alice"))
            .await
            .unwrap();
        let joined = JoinRoomUseCase::new(ctx.rooms(), ctx.sessions(), ctx.pusher())
            .execute(connection("bob"), created.room_code.as_str())
            .await
            .unwrap();
        alice_inbox.drain();

        // when (操作):
        let left = leave_usecase(&ctx).execute(&connection("bob")).await.unwrap();

        // then (期待する結果):
        assert!(!left.room_deleted);
        assert_eq!(left.username, joined.username);
        assert_eq!(
            alice_inbox.drain(),
            vec![ServerMessage::UserLeft {
                username: joined.username.as_str().to_string()
            }]
        );
        assert!(bob_inbox.drain().is_empty());
        let room = ctx
            .room_repository
            .get_room(&created.room_code)
            .await
            .unwrap();
        assert_eq!(room.member_count(), 1);
        assert!(
            ctx.session_repository
                .get_session(&connection("bob"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_leave_room_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが抜けるとルームが削除される
        // given (前提条件):
        let ctx = TestContext::new();
        let created = CreateRoomUseCase::new(ctx.rooms(), ctx.sessions(), ctx.clock.clone())
            .execute(connection("alice"))
            .await
            .unwrap();

        // when (操作):
        let left = leave_usecase(&ctx)
            .execute(&connection("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(left.room_deleted);
        assert!(
            ctx.room_repository
                .get_room(&created.room_code)
                .await
                .is_none()
        );
        assert_eq!(ctx.session_repository.count_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_leave_room_without_session() {
        // テスト項目: ルームに参加していない接続の退出は何もしない
        // given (前提条件):
        let ctx = TestContext::new();

        // when (操作):
        let left = leave_usecase(&ctx).execute(&connection("stranger")).await;

        // then (期待する結果):
        assert!(left.is_none());
    }
}
