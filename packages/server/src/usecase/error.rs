//! UseCase error types.

use thiserror::Error;

/// Join rejection.
///
/// `Validation` and `Auth` are reported to the client; their `Display`
/// strings are the wire error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("room id and nickname are required")]
    Validation,

    #[error("password mismatch")]
    Auth,

    #[error("session cannot join: {0}")]
    InvalidSession(String),
}

impl JoinError {
    /// Whether the originating client is told about this error.
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Validation | Self::Auth)
    }
}

/// Rejection of a chat / update event. Never reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("session has not joined a room")]
    NotJoined,

    #[error("new nickname must not be empty")]
    EmptyNickname,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
