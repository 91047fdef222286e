//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 回の呼び出しでアトミックに実行されることを実装側が保証します。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, RepositoryError, Room, RoomCode, Session, Timestamp};

/// Room Repository trait（ルームレジストリ）
///
/// ルームの唯一の所有者。コードの一意性とルームのライフサイクルを管理する。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しいルームを作成し、生成したコードを返す
    ///
    /// コードの衝突チェックと登録は同じロック内で行われる。
    async fn create_room(
        &self,
        creator: ConnectionId,
        creator_name: DisplayName,
        created_at: Timestamp,
    ) -> RoomCode;

    /// ルームにメンバーを追加
    ///
    /// * `RoomNotFound` - ルームが存在しない
    /// * `AlreadyMember` - 既にメンバーである
    async fn join_room(
        &self,
        code: &RoomCode,
        connection_id: ConnectionId,
        name: DisplayName,
    ) -> Result<(), RepositoryError>;

    /// ルームからメンバーを削除
    ///
    /// メンバーが 0 人になった場合はルームごと削除する。
    /// ルームが残っていれば `Some(残りのメンバー)`、ルームが存在しなければ `None`。
    async fn remove_member(
        &self,
        code: &RoomCode,
        connection_id: &ConnectionId,
    ) -> Option<Vec<ConnectionId>>;

    /// 管理者によるルームのクローズ
    ///
    /// `requester` が管理者の場合のみルームを削除して返す。それ以外は何もせず `None`。
    async fn close_room(&self, code: &RoomCode, requester: &ConnectionId) -> Option<Room>;

    /// ルームのスナップショットを取得
    async fn get_room(&self, code: &RoomCode) -> Option<Room>;

    /// ルームのメンバーの接続 ID を取得
    async fn member_ids(&self, code: &RoomCode) -> Option<Vec<ConnectionId>>;

    /// アクティブなルーム数を取得
    async fn count_rooms(&self) -> usize;
}

/// Session Repository trait（セッションレジストリ）
///
/// 「どの接続がどのルームにいるか」の唯一の情報源。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを作成（既存のものは上書き）
    async fn open_session(&self, connection_id: ConnectionId, session: Session);

    /// セッションを取得
    async fn get_session(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// セッションを削除（冪等）
    async fn close_session(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// セッションが `room_code` のルームを指している場合だけ削除
    ///
    /// 別のルームのセッションに切り替わっていれば何もせず `None`。
    async fn close_session_in(
        &self,
        connection_id: &ConnectionId,
        room_code: &RoomCode,
    ) -> Option<Session>;

    /// アクティブなセッション数を取得
    async fn count_sessions(&self) -> usize;
}
