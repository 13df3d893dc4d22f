//! Domain layer: value objects, entities, events and the ports the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    Departure, JoinOutcome, Room, RoomSnapshot, Roster, RosterEntry, Session, SessionState,
};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use event::ServerEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, Nickname, Password, RoomId, Style, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
