//! Outbound events the server sends to connections.

use super::{entity::RosterEntry, value_object::Style};

/// Server-to-client event, independent of the wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Acknowledgement sent to a connection that has just joined a room.
    JoinSuccess,
    /// Rejection of a request, sent to the originating connection only.
    Error { message: String },
    /// Chat line, either a system notice (no style) or a user message.
    Chat { text: String, style: Option<Style> },
    /// Current roster of a room.
    UserList { users: Vec<RosterEntry> },
}

impl ServerEvent {
    pub fn system(text: impl Into<String>) -> Self {
        Self::Chat {
            text: text.into(),
            style: None,
        }
    }

    pub fn chat(text: impl Into<String>, style: Option<Style>) -> Self {
        Self::Chat {
            text: text.into(),
            style,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
