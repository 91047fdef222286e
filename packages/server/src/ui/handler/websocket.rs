//! WebSocket connection handlers.
//!
//! 1 つの接続につき 2 つのタスクを起動する:
//!
//! - recv タスク: クライアントからのイベントを受信順に 1 つずつ処理する
//! - pusher タスク: チャンネルに積まれた JSON をクライアントへ送信する
//!
//! 切断時の後始末は recv タスクが終了した後にだけ実行される。

use std::{panic::AssertUnwindSafe, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{FutureExt, sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PusherChannel},
    infrastructure::dto::websocket::{
        ClientMessage, ErrorCode, ReplyMessage, RequestKind, ServerMessage,
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx.clone()).await;
    tracing::info!("Client '{}' connected", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(event) => {
                        handle_client_message(&recv_state, &recv_connection_id, &tx, event).await
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Dropping undecodable frame from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // recv タスクは中断しない（処理中のイベントを完了させてから後始末する）
    let recv_result = tokio::select! {
        result = &mut recv_task => {
            send_task.abort();
            result
        }
        _ = &mut send_task => (&mut recv_task).await,
    };
    if let Err(e) = recv_result
        && e.is_panic()
    {
        tracing::error!("Receive task of '{}' panicked", connection_id);
    }

    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
}

/// Dispatch one decoded client event to its use case
async fn handle_client_message(
    state: &AppState,
    connection_id: &ConnectionId,
    reply_tx: &PusherChannel,
    event: ClientMessage,
) {
    match event {
        ClientMessage::CreateRoom => {
            let reply = create_room_reply(state, connection_id).await;
            send_reply(reply_tx, connection_id, reply);
        }
        ClientMessage::JoinRoom { room_code } => {
            let reply = join_room_reply(state, connection_id, &room_code).await;
            send_reply(reply_tx, connection_id, reply);
        }
        ClientMessage::SendMessage { message } => {
            send_message(state, connection_id, &message).await;
        }
        ClientMessage::CloseRoom { room_code } => {
            close_room(state, connection_id, &room_code).await;
        }
        ClientMessage::LeaveRoom => {
            leave_room(state, connection_id).await;
        }
    }
}

async fn send_message(state: &AppState, connection_id: &ConnectionId, message: &str) {
    let result = AssertUnwindSafe(state.send_message_usecase.execute(connection_id, message))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!("Dropped message from '{}': {}", connection_id, e),
        Err(_) => tracing::error!("send-message from '{}' panicked", connection_id),
    }
}

async fn close_room(state: &AppState, connection_id: &ConnectionId, room_code: &str) {
    let result = AssertUnwindSafe(state.close_room_usecase.execute(connection_id, room_code))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!("Ignored close-room from '{}': {}", connection_id, e),
        Err(_) => tracing::error!("close-room from '{}' panicked", connection_id),
    }
}

async fn leave_room(state: &AppState, connection_id: &ConnectionId) {
    let result = AssertUnwindSafe(state.leave_room_usecase.execute(connection_id))
        .catch_unwind()
        .await;

    match result {
        Ok(Some(_)) => {}
        Ok(None) => tracing::warn!("Ignored leave-room from '{}': not in a room", connection_id),
        Err(_) => tracing::error!("leave-room from '{}' panicked", connection_id),
    }
}

async fn create_room_reply(state: &AppState, connection_id: &ConnectionId) -> ReplyMessage {
    let request = RequestKind::CreateRoom;
    let result = AssertUnwindSafe(state.create_room_usecase.execute(connection_id.clone()))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(joined)) => ReplyMessage::success(
            request,
            joined.room_code.into_string(),
            joined.username.into_string(),
        ),
        Ok(Err(e)) => {
            tracing::warn!("create-room from '{}' rejected: {}", connection_id, e);
            ReplyMessage::error(request, e.kind().into(), e.client_message())
        }
        Err(_) => {
            tracing::error!("create-room from '{}' panicked", connection_id);
            ReplyMessage::error(request, ErrorCode::Internal, "Failed to create room")
        }
    }
}

async fn join_room_reply(
    state: &AppState,
    connection_id: &ConnectionId,
    raw_code: &str,
) -> ReplyMessage {
    let request = RequestKind::JoinRoom;
    let result = AssertUnwindSafe(
        state
            .join_room_usecase
            .execute(connection_id.clone(), raw_code),
    )
    .catch_unwind()
    .await;

    match result {
        Ok(Ok(joined)) => ReplyMessage::success(
            request,
            joined.room_code.into_string(),
            joined.username.into_string(),
        ),
        Ok(Err(e)) => {
            tracing::warn!("join-room from '{}' rejected: {}", connection_id, e);
            ReplyMessage::error(request, e.kind().into(), e.client_message())
        }
        Err(_) => {
            tracing::error!("join-room from '{}' panicked", connection_id);
            ReplyMessage::error(
                request,
                ErrorCode::Internal,
                "Failed to join room. Please try again.",
            )
        }
    }
}

fn send_reply(reply_tx: &PusherChannel, connection_id: &ConnectionId, reply: ReplyMessage) {
    match serde_json::to_string(&ServerMessage::Reply(reply)) {
        Ok(json) => {
            if reply_tx.send(json).is_err() {
                tracing::debug!("Client '{}' is gone, reply dropped", connection_id);
            }
        }
        Err(e) => tracing::error!("Failed to encode reply for '{}': {}", connection_id, e),
    }
}
