//! HTTP API response DTOs.

use serde::Serialize;

use super::websocket::UserInfo;

/// Entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub members: usize,
    pub has_password: bool,
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_id}`.
///
/// `users` is left out for password-protected rooms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub has_password: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserInfo>>,
}
