//! UseCase layer.
//!
//! One use case per client operation. Every use case mutates state through
//! the `RoomRepository` first and only then fans out through the
//! `BroadcastService`, so no lock is held while sending.

mod broadcast;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_rooms;
mod join_room;
mod send_message;
mod update_nickname;
mod update_style;

pub use broadcast::BroadcastService;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{EventError, GetRoomDetailError, JoinError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use join_room::{JoinRequest, JoinRoomUseCase};
pub use send_message::SendMessageUseCase;
pub use update_nickname::UpdateNicknameUseCase;
pub use update_style::UpdateStyleUseCase;

#[cfg(test)]
pub(crate) mod test_support;
