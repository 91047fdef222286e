//! Client-side view of the connection state.
//!
//! The server is the source of truth. This state only mirrors what the replies
//! and events told us, so that the prompt and local checks (`/close`, `/leave`)
//! can be answered without a round trip.

use std::collections::VecDeque;

use hanare_server::infrastructure::dto::websocket::{ReplyMessage, RequestKind, ServerMessage};

use crate::formatter::MessageFormatter;

/// The room this client is in, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub room_code: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    room: Option<JoinedRoom>,
    /// 送信済みでまだエコーが届いていないメッセージ（送信順）
    ///
    /// 自分の発言は表示名と本文の両方が一致したときだけ (me) とする。
    sent: VecDeque<String>,
}

impl ClientState {
    pub fn room(&self) -> Option<&JoinedRoom> {
        self.room.as_ref()
    }

    pub fn is_in_room(&self) -> bool {
        self.room.is_some()
    }

    pub fn leave(&mut self) -> Option<JoinedRoom> {
        self.sent.clear();
        self.room.take()
    }

    /// Remember a message we are about to send, to recognise its echo
    pub fn record_sent(&mut self, message: &str) {
        self.sent.push_back(message.trim().to_string());
    }

    /// Whether a `new-message` is the echo of one of our own messages
    fn take_own_echo(&mut self, username: &str, message: &str) -> bool {
        let named_like_me = self
            .room
            .as_ref()
            .is_some_and(|room| room.username == username);
        if !named_like_me {
            return false;
        }
        match self.sent.iter().position(|sent| sent == message) {
            Some(index) => {
                self.sent.remove(index);
                true
            }
            None => false,
        }
    }

    /// Prompt reflecting the current room and name
    pub fn prompt(&self) -> String {
        match &self.room {
            Some(room) => format!("[{}] {}> ", room.room_code, room.username),
            None => "> ".to_string(),
        }
    }

    /// Apply one server event and render it for display
    pub fn handle_event(&mut self, event: &ServerMessage) -> String {
        match event {
            ServerMessage::Reply(reply) => self.handle_reply(reply),
            ServerMessage::UserJoined { username } => {
                MessageFormatter::format_user_joined(username)
            }
            ServerMessage::UserLeft { username } => MessageFormatter::format_user_left(username),
            ServerMessage::NewMessage {
                username,
                message,
                is_admin,
                timestamp,
            } => {
                let is_me = self.take_own_echo(username, message);
                MessageFormatter::format_new_message(username, message, *is_admin, is_me, *timestamp)
            }
            ServerMessage::RoomClosed => {
                self.leave();
                MessageFormatter::format_room_closed()
            }
        }
    }

    fn handle_reply(&mut self, reply: &ReplyMessage) -> String {
        if !reply.is_success() {
            let message = reply.message.as_deref().unwrap_or("Request failed");
            return MessageFormatter::format_notice(message);
        }

        let (Some(room_code), Some(username)) = (&reply.room_code, &reply.username) else {
            tracing::warn!("Success reply without room details: {:?}", reply);
            return MessageFormatter::format_notice("Unexpected reply from server");
        };

        let is_admin = reply.request == RequestKind::CreateRoom;
        self.sent.clear();
        self.room = Some(JoinedRoom {
            room_code: room_code.clone(),
            username: username.clone(),
            is_admin,
        });

        if is_admin {
            MessageFormatter::format_room_created(room_code, username)
        } else {
            MessageFormatter::format_room_joined(room_code, username)
        }
    }
}
