//! UseCase: 接続処理
//!
//! 新しい WebSocket 接続に接続 ID を払い出し、Unjoined 状態のセッションと
//! 送信チャンネルを登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomRepository};

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続を登録し、払い出した接続 ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let id = ConnectionId::generate();
        self.repository.register_session(id).await;
        self.message_pusher.register_client(id, sender).await;
        id
    }
}
