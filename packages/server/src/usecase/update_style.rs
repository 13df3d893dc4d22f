//! UseCase: スタイル変更処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository, Style};

use super::{BroadcastService, error::EventError};

/// スタイル変更のユースケース
///
/// チャットメッセージは送らず、名簿のみを再送する。
pub struct UpdateStyleUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcast: Arc<BroadcastService>,
}

impl UpdateStyleUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcast: Arc<BroadcastService>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }

    pub async fn execute(&self, id: ConnectionId, style: Option<Style>) -> Result<(), EventError> {
        let room_id = self
            .repository
            .update_style(id, style)
            .await
            .map_err(|_| EventError::NotJoined)?;
        tracing::debug!("Connection '{}' updated style in room '{}'", id, room_id);

        self.broadcast.broadcast_user_list(&room_id).await;
        Ok(())
    }
}
