//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 全ての操作は 1 つの `Mutex` の中で完結するため、
//! 「コードの衝突チェック → 登録」「メンバー確認 → 追加」などはアトミックに実行されます。
//! プロセスをまたいだ共有は行いません（複数プロセス構成ではルームは共有されない）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, RepositoryError, Room, RoomCode, RoomCodeFactory, RoomRepository,
    Timestamp,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ルームコード → ルーム
    rooms: Mutex<HashMap<RoomCode, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        creator: ConnectionId,
        creator_name: DisplayName,
        created_at: Timestamp,
    ) -> RoomCode {
        let mut rooms = self.rooms.lock().await;
        let code = RoomCodeFactory::generate(&mut rand::rng(), |code| rooms.contains_key(code));
        rooms.insert(
            code.clone(),
            Room::new(code.clone(), creator, creator_name, created_at),
        );
        code
    }

    async fn join_room(
        &self,
        code: &RoomCode,
        connection_id: ConnectionId,
        name: DisplayName,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.to_string()))?;

        if room.is_member(&connection_id) {
            return Err(RepositoryError::AlreadyMember {
                room_code: code.to_string(),
                connection_id: connection_id.to_string(),
            });
        }
        room.add_member(connection_id, name);
        Ok(())
    }

    async fn remove_member(
        &self,
        code: &RoomCode,
        connection_id: &ConnectionId,
    ) -> Option<Vec<ConnectionId>> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(code)?;
        room.remove_member(connection_id);

        if room.is_empty() {
            rooms.remove(code);
            tracing::info!("Room {} removed (no members left)", code);
            return None;
        }
        Some(room.member_ids())
    }

    async fn close_room(&self, code: &RoomCode, requester: &ConnectionId) -> Option<Room> {
        let mut rooms = self.rooms.lock().await;
        match rooms.get(code) {
            Some(room) if room.is_admin(requester) => rooms.remove(code),
            _ => None,
        }
    }

    async fn get_room(&self, code: &RoomCode) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).cloned()
    }

    async fn member_ids(&self, code: &RoomCode) -> Option<Vec<ConnectionId>> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).map(Room::member_ids)
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{ROOM_CODE_ALPHABET, ROOM_CODE_LENGTH};
    use std::collections::HashSet;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository のルーム作成・参加・退出・クローズ
    // - ルームコードの一意性
    // - メンバーが 0 人になったルームの自動削除
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるデータアクセス層の中核
    // - ルームのライフサイクル（作成 → 参加/退出 → 削除）の不変条件を保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. ルーム作成とコード形式
    // 2. 参加の成功・ルーム不在・重複参加
    // 3. 最後のメンバーの退出でルームが削除される
    // 4. 管理者以外のクローズは何もしない
    // ========================================

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    async fn create_room_by(repo: &InMemoryRoomRepository, creator: &str) -> RoomCode {
        repo.create_room(connection(creator), name("Red-Lion-Apple"), Timestamp::new(1000))
            .await
    }

    #[tokio::test]
    async fn test_create_room_registers_creator_as_admin() {
        // テスト項目: ルーム作成時に作成者が管理者かつ唯一のメンバーとして登録される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let code = create_room_by(&repo, "alice").await;

        // then (期待する結果):
        assert_eq!(code.as_str().len(), ROOM_CODE_LENGTH);
        assert!(
            code.as_str()
                .bytes()
                .all(|b| ROOM_CODE_ALPHABET.contains(&b))
        );
        let room = repo.get_room(&code).await.unwrap();
        assert!(room.is_admin(&connection("alice")));
        assert_eq!(room.member_count(), 1);
        assert_eq!(room.created_at, Timestamp::new(1000));
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_created_room_codes_are_unique() {
        // テスト項目: 同時にアクティブなルームのコードは全て異なる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let mut codes = HashSet::new();
        for i in 0..200 {
            let code = create_room_by(&repo, &format!("client-{}", i)).await;
            codes.insert(code);
        }

        // then (期待する結果):
        assert_eq!(codes.len(), 200);
        assert_eq!(repo.count_rooms().await, 200);
    }

    #[tokio::test]
    async fn test_join_room_success() {
        // テスト項目: 存在するルームに参加できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;

        // when (操作):
        let result = repo
            .join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let members = repo.member_ids(&code).await.unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.contains(&connection("bob")));
    }

    #[tokio::test]
    async fn test_join_room_not_found() {
        // テスト項目: 存在しないルームへの参加は RoomNotFound
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = RoomCode::new("ZZZZZZ".to_string()).unwrap();

        // when (操作):
        let result = repo
            .join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::RoomNotFound("ZZZZZZ".to_string()))
        );
    }

    #[tokio::test]
    async fn test_join_room_twice_is_already_member() {
        // テスト項目: 同じ接続が同じルームに 2 回参加すると AlreadyMember
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;
        repo.join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .join_room(&code, connection("bob"), name("Green-Wolf-Mango"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::AlreadyMember { .. })));
        assert_eq!(repo.member_ids(&code).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_member_returns_remaining() {
        // テスト項目: 最後でないメンバーの削除では残りのメンバーが返され、ルームは残る
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;
        repo.join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await
            .unwrap();

        // when (操作):
        let remaining = repo.remove_member(&code, &connection("bob")).await;

        // then (期待する結果):
        assert_eq!(remaining, Some(vec![connection("alice")]));
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_remove_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが抜けるとルームが削除される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;

        // when (操作):
        let remaining = repo.remove_member(&code, &connection("alice")).await;

        // then (期待する結果):
        assert_eq!(remaining, None);
        assert!(repo.get_room(&code).await.is_none());
        assert_eq!(repo.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_close_room_by_admin() {
        // テスト項目: 管理者はルームをクローズでき、削除されたルームが返される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;
        repo.join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await
            .unwrap();

        // when (操作):
        let closed = repo.close_room(&code, &connection("alice")).await;

        // then (期待する結果):
        let closed = closed.unwrap();
        assert_eq!(closed.member_count(), 2);
        assert!(repo.get_room(&code).await.is_none());
    }

    #[tokio::test]
    async fn test_close_room_by_non_admin_is_noop() {
        // テスト項目: 管理者以外のクローズ要求は何もしない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let code = create_room_by(&repo, "alice").await;
        repo.join_room(&code, connection("bob"), name("Blue-Bear-Grape"))
            .await
            .unwrap();

        // when (操作):
        let closed = repo.close_room(&code, &connection("bob")).await;

        // then (期待する結果):
        assert!(closed.is_none());
        assert_eq!(repo.member_ids(&code).await.unwrap().len(), 2);
    }
}
