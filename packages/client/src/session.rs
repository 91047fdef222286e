//! WebSocket client session management.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use hanare_server::{
    domain::RoomCode,
    infrastructure::dto::websocket::{ClientMessage, ReplyMessage, RequestKind, ServerMessage},
};
use hanare_shared::time::current_timestamp_millis;
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc, oneshot},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::Command, error::ClientError, formatter::MessageFormatter, state::ClientState,
    ui::redisplay_prompt,
};

/// join-room の応答を待つ最大時間
pub const JOIN_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// join-room の応答待ち
type PendingJoin = Arc<Mutex<Option<oneshot::Sender<ReplyMessage>>>>;

/// Run one WebSocket session until the user quits or the connection is lost
///
/// Returns `Ok(())` when the user quits, an error when the connection is lost.
pub async fn run_client_session(
    url: &str,
    state: &Arc<Mutex<ClientState>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Http(response) => ClientError::Protocol(format!(
            "server rejected the handshake with status {}",
            response.status()
        )),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to chat server!");
    print!(
        "{}",
        MessageFormatter::format_welcome(url, current_timestamp_millis())
    );
    redisplay_prompt(&state.lock().await.prompt());

    let (mut write, mut read) = ws_stream.split();
    let pending: PendingJoin = Arc::new(Mutex::new(None));

    let read_state = state.clone();
    let read_pending = pending.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let output = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(event) => handle_server_message(&read_state, &read_pending, event).await,
                        Err(e) => {
                            tracing::warn!("Failed to parse server event: {}", e);
                            Some(MessageFormatter::format_raw_message(text.as_str()))
                        }
                    };
                    if let Some(output) = output {
                        print!("{}", output);
                        redisplay_prompt(&read_state.lock().await.prompt());
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let result = tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        write_result = input_loop(&mut write, input_rx, state, &pending) => {
            read_task.abort();
            write_result
        }
    };

    if result.is_ok() {
        write.close().await.ok();
    }
    // 再接続後は新しい接続として扱われるため、ルームの状態は引き継がない
    state.lock().await.leave();

    result
}

/// Apply a server event to the local state and notify a waiting `/join`
///
/// A join reply nobody waits for any more (the `/join` already timed out) is dropped.
async fn handle_server_message(
    state: &Mutex<ClientState>,
    pending: &PendingJoin,
    event: ServerMessage,
) -> Option<String> {
    if let ServerMessage::Reply(reply) = &event
        && reply.request == RequestKind::JoinRoom
    {
        let waiter = pending.lock().await.take();
        let Some(waiter) = waiter.filter(|waiter| !waiter.is_closed()) else {
            tracing::warn!("Dropping join-room reply after timeout: {:?}", reply);
            return None;
        };
        let output = state.lock().await.handle_event(&event);
        waiter.send(reply.clone()).ok();
        return Some(output);
    }

    Some(state.lock().await.handle_event(&event))
}

/// Read commands from the prompt and send the matching events
async fn input_loop(
    write: &mut WsSink,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    state: &Mutex<ClientState>,
    pending: &PendingJoin,
) -> Result<(), ClientError> {
    while let Some(line) = input_rx.recv().await {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                notice(state, &e.to_string()).await;
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                print!("{}", MessageFormatter::format_help());
                redisplay_prompt(&state.lock().await.prompt());
            }
            Command::Create => send_event(write, &ClientMessage::CreateRoom).await?,
            Command::Join(raw) => {
                let Ok(room_code) = RoomCode::normalize(&raw) else {
                    notice(state, "Invalid room code format").await;
                    continue;
                };

                let (tx, rx) = oneshot::channel();
                *pending.lock().await = Some(tx);
                send_event(
                    write,
                    &ClientMessage::JoinRoom {
                        room_code: room_code.into_string(),
                    },
                )
                .await?;

                if tokio::time::timeout(JOIN_REPLY_TIMEOUT, rx).await.is_err() {
                    pending.lock().await.take();
                    notice(state, "Server timeout").await;
                }
            }
            Command::Leave => {
                let left = state.lock().await.leave();
                match left {
                    Some(room) => {
                        send_event(write, &ClientMessage::LeaveRoom).await?;
                        notice(state, &format!("Left room {}", room.room_code)).await;
                    }
                    None => notice(state, "You are not in a room").await,
                }
            }
            Command::Close => {
                let room = state.lock().await.room().cloned();
                match room {
                    Some(room) if room.is_admin => {
                        send_event(
                            write,
                            &ClientMessage::CloseRoom {
                                room_code: room.room_code,
                            },
                        )
                        .await?;
                    }
                    Some(_) => notice(state, "Only the room admin can close the room").await,
                    None => notice(state, "You are not in a room").await,
                }
            }
            Command::Message(message) => {
                let in_room = {
                    let mut state = state.lock().await;
                    if state.is_in_room() {
                        state.record_sent(&message);
                    }
                    state.is_in_room()
                };
                if in_room {
                    send_event(write, &ClientMessage::SendMessage { message }).await?;
                } else {
                    notice(state, "Create or join a room first (type /help)").await;
                }
            }
        }
    }

    // 入力の終了（Ctrl+C / Ctrl+D）
    Ok(())
}

async fn send_event(write: &mut WsSink, event: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(event)
        .map_err(|e| ClientError::Protocol(format!("failed to encode event: {e}")))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

async fn notice(state: &Mutex<ClientState>, text: &str) {
    print!("{}", MessageFormatter::format_notice(text));
    redisplay_prompt(&state.lock().await.prompt());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join_success() -> ServerMessage {
        ServerMessage::Reply(ReplyMessage::success(
            RequestKind::JoinRoom,
            "X7K2QP".to_string(),
            "Red-Lion-Apple".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_join_reply_with_waiter_enters_room() {
        // テスト項目: 応答待ちの /join に成功応答が届くとルームに入り、待ち側に通知される
        // given (前提条件):
        let state = Mutex::new(ClientState::default());
        let (tx, rx) = oneshot::channel();
        let pending: PendingJoin = Arc::new(Mutex::new(Some(tx)));

        // when (操作):
        let output = handle_server_message(&state, &pending, join_success()).await;

        // then (期待する結果):
        assert!(output.is_some());
        assert!(state.lock().await.is_in_room());
        assert!(rx.await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_join_reply_after_timeout_is_dropped() {
        // テスト項目: タイムアウト済みの /join に遅れて届いた成功応答は無視される
        // given (前提条件):
        let state = Mutex::new(ClientState::default());
        let pending: PendingJoin = Arc::new(Mutex::new(None));

        // when (操作):
        let output = handle_server_message(&state, &pending, join_success()).await;

        // then (期待する結果):
        assert!(output.is_none());
        assert!(!state.lock().await.is_in_room());
    }

    #[tokio::test]
    async fn test_join_reply_for_abandoned_waiter_is_dropped() {
        // テスト項目: 待ち側が既に諦めていた（受信側が破棄済み）場合も応答は無視される
        // given (前提条件):
        let state = Mutex::new(ClientState::default());
        let (tx, rx) = oneshot::channel::<ReplyMessage>();
        drop(rx);
        let pending: PendingJoin = Arc::new(Mutex::new(Some(tx)));

        // when (操作):
        let output = handle_server_message(&state, &pending, join_success()).await;

        // then (期待する結果):
        assert!(output.is_none());
        assert!(!state.lock().await.is_in_room());
        assert!(pending.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_create_reply_does_not_need_waiter() {
        // テスト項目: create-room の応答は待ち状態に関係なく反映される
        // given (前提条件):
        let state = Mutex::new(ClientState::default());
        let pending: PendingJoin = Arc::new(Mutex::new(None));
        let reply = ServerMessage::Reply(ReplyMessage::success(
            RequestKind::CreateRoom,
            "X7K2QP".to_string(),
            "Red-Lion-Apple".to_string(),
        ));

        // when (操作):
        let output = handle_server_message(&state, &pending, reply).await;

        // then (期待する結果):
        assert!(output.is_some());
        assert!(state.lock().await.room().unwrap().is_admin);
    }
}
