//! Shared application state.

use std::sync::Arc;

use hanare_shared::time::Clock;

use crate::{
    domain::{MessagePusher, RoomRepository, SessionRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    usecase::{
        CloseRoomUseCase, ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase,
        GetServerStatsUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase,
    },
};

/// Shared application state
///
/// ハンドラーはユースケースだけを参照し、Repository や MessagePusher には直接触れない。
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub close_room_usecase: Arc<CloseRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub get_server_stats_usecase: Arc<GetServerStatsUseCase>,
}

impl AppState {
    /// 与えられた Repository / MessagePusher / Clock からユースケースを組み立てる
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
            room_repository.clone(),
            session_repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                clock.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
                clock,
            )),
            close_room_usecase: Arc::new(CloseRoomUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                leave_room_usecase.clone(),
                message_pusher,
            )),
            leave_room_usecase,
            get_server_stats_usecase: Arc::new(GetServerStatsUseCase::new(
                room_repository,
                session_repository,
            )),
        }
    }

    /// インメモリのレジストリと WebSocket の MessagePusher で組み立てる
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(WebSocketMessagePusher::default()),
            clock,
        )
    }
}
