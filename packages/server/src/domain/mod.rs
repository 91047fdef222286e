//! Domain layer: rooms, sessions and the interfaces the use cases depend on.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Room, RoomEvent, Session};
pub use error::{ErrorKind, MessagePushError, RepositoryError, ValueObjectError};
pub use factory::{DisplayNameFactory, RoomCodeFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository};
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomCode, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
