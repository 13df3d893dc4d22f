//! Domain error types.

use thiserror::Error;

/// Validation and state-transition errors raised by value objects and
/// entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("session has already joined a room")]
    AlreadyJoined,

    #[error("session has not joined a room")]
    NotJoined,

    #[error("session is closed")]
    SessionClosed,
}

/// Errors returned by a `RoomRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("password mismatch for room '{0}'")]
    PasswordMismatch(String),

    #[error(transparent)]
    InvalidTransition(#[from] DomainError),
}

/// Errors returned by a `MessagePusher`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
