//! Broadcast engine: fan-out of chat lines and rosters to a room.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository, ServerEvent, Style};

/// ルーム内の全メンバーへのブロードキャスト
///
/// 送信先はリポジトリから読み取ったスナップショットで、読み取りロックは
/// 送信前に解放されている。ルームが既に存在しない場合は何もしない。
pub struct BroadcastService {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastService {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Send a chat line to every joined member of the room.
    ///
    /// Returns the number of recipients, 0 if the room is gone.
    pub async fn broadcast(&self, room_id: &RoomId, text: String, style: Option<Style>) -> usize {
        let Some(targets) = self.repository.get_member_ids(room_id).await else {
            tracing::debug!("Room '{}' no longer exists, skipping broadcast", room_id);
            return 0;
        };
        self.fan_out(&targets, &ServerEvent::chat(text, style))
            .await;
        targets.len()
    }

    /// Send the current roster to every joined member of the room.
    ///
    /// Returns the number of recipients, 0 if the room is gone.
    pub async fn broadcast_user_list(&self, room_id: &RoomId) -> usize {
        let Some(roster) = self.repository.get_roster(room_id).await else {
            tracing::debug!("Room '{}' no longer exists, skipping user list", room_id);
            return 0;
        };
        let event = ServerEvent::UserList {
            users: roster.entries,
        };
        self.fan_out(&roster.recipients, &event).await;
        roster.recipients.len()
    }

    /// Send an event to a single connection. Failures are logged, not returned.
    pub async fn send_to(&self, client_id: &ConnectionId, event: &ServerEvent) {
        if let Err(e) = self.message_pusher.push_to(client_id, event).await {
            tracing::warn!("Failed to send message to '{}': {}", client_id, e);
        }
    }

    async fn fan_out(&self, targets: &[ConnectionId], event: &ServerEvent) {
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast message: {}", e);
        }
    }
}
