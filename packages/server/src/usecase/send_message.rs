//! UseCase: メッセージ送信処理
//!
//! 表示に使うニックネームとスタイルはメッセージのペイロードの値をそのまま
//! 使い、セッションに保存された値とは照合しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository, Style};

use super::{BroadcastService, error::EventError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcast: Arc<BroadcastService>,
}

impl SendMessageUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcast: Arc<BroadcastService>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }

    /// `"<nickname>: <text>"` を送信者を含むルーム全員に送る
    ///
    /// # Returns
    ///
    /// 送信先の数
    pub async fn execute(
        &self,
        id: ConnectionId,
        nickname: String,
        text: String,
        style: Option<Style>,
    ) -> Result<usize, EventError> {
        let room_id = self
            .repository
            .joined_room(id)
            .await
            .ok_or(EventError::NotJoined)?;

        let line = format!("{}: {}", nickname, text);
        tracing::debug!("Broadcasting chat in room '{}': {}", room_id, line);
        Ok(self.broadcast.broadcast(&room_id, line, style).await)
    }
}
