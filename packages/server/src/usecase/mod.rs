//! UseCase layer
//!
//! 各ユースケースは 1 つのクライアントイベントに対応します。
//! Repository / MessagePusher / Clock は trait object として注入されます。

pub mod close_room;
pub mod connect_client;
pub mod create_room;
pub mod disconnect_client;
pub mod error;
pub mod get_server_stats;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use close_room::CloseRoomUseCase;
pub use connect_client::ConnectClientUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{CloseRoomError, CreateRoomError, JoinRoomError, SendMessageError};
pub use get_server_stats::{GetServerStatsUseCase, ServerStats};
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveRoomUseCase, LeftRoom};
pub use send_message::SendMessageUseCase;

use crate::domain::{DisplayName, RoomCode};

/// ルーム作成・参加に成功したときの結果
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRoom {
    pub room_code: RoomCode,
    pub username: DisplayName,
}
