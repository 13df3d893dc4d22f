//! Conversion logic between DTOs and domain types.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{RoomSnapshot, RosterEntry, ServerEvent};
use crate::infrastructure::dto::{
    http::{RoomDetailDto, RoomSummaryDto},
    websocket::{OutboundMessage, UserInfo},
};

/// Message carried by the `join_success` acknowledgement.
pub const JOIN_SUCCESS_MESSAGE: &str = "joined the room successfully";

// ========================================
// Domain → DTO
// ========================================

impl From<&RosterEntry> for UserInfo {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            nickname: entry.nickname.as_str().to_string(),
            style: entry.style.clone(),
        }
    }
}

impl From<&ServerEvent> for OutboundMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::JoinSuccess => Self::JoinSuccess {
                message: JOIN_SUCCESS_MESSAGE.to_string(),
            },
            ServerEvent::Error { message } => Self::Error {
                message: message.clone(),
            },
            ServerEvent::Chat { text, style } => Self::Chat {
                text: text.clone(),
                style: style.clone(),
            },
            ServerEvent::UserList { users } => Self::UserList {
                users: users.iter().map(UserInfo::from).collect(),
            },
        }
    }
}

impl From<&RoomSnapshot> for RoomSummaryDto {
    fn from(room: &RoomSnapshot) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            members: room.roster.len(),
            has_password: room.has_password,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(room: RoomSnapshot) -> Self {
        let users = if room.has_password {
            None
        } else {
            Some(room.roster.iter().map(UserInfo::from).collect())
        };
        Self {
            id: room.id.into_string(),
            has_password: room.has_password,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            users,
        }
    }
}
