//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退室通知、名簿の更新、空になったルームの削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残るルームからの退室
//! - エッジケース：最後のメンバーの退室（通知なし・ルーム削除）
//! - エッジケース：未参加のまま切断、二重の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, RoomRepository};

use super::BroadcastService;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcast: Arc<BroadcastService>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast: Arc<BroadcastService>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            broadcast,
        }
    }

    /// 切断を実行（どの状態からでも可、冪等）
    ///
    /// ルームにメンバーが残る場合のみ退室メッセージと名簿を送る。
    pub async fn execute(&self, id: ConnectionId) -> Departure {
        let departure = self.repository.close_session(id).await;
        self.message_pusher.unregister_client(&id).await;

        let Some(room_id) = &departure.room else {
            tracing::debug!("Connection '{}' closed without joining a room", id);
            return departure;
        };

        if departure.room_removed {
            tracing::info!("Room '{}' is empty and was removed", room_id);
            return departure;
        }

        if let Some(nickname) = &departure.nickname {
            tracing::info!("'{}' ({}) left room '{}'", nickname, id, room_id);
            self.broadcast
                .broadcast(room_id, format!("{} has left", nickname), None)
                .await;
        }
        self.broadcast.broadcast_user_list(room_id).await;

        departure
    }
}
