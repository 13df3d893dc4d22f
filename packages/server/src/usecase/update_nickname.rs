//! UseCase: ニックネーム変更処理
//!
//! ニックネームの重複チェックは行わない。旧ニックネームはクライアントが
//! 送ってきた値をそのまま通知に使う。

use std::sync::Arc;

use crate::domain::{ConnectionId, Nickname, RoomRepository, Style};

use super::{BroadcastService, error::EventError};

/// ニックネーム変更のユースケース
pub struct UpdateNicknameUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcast: Arc<BroadcastService>,
}

impl UpdateNicknameUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcast: Arc<BroadcastService>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }

    /// ニックネーム変更を実行
    ///
    /// `style` が指定された場合はスタイルも同時に更新する。
    pub async fn execute(
        &self,
        id: ConnectionId,
        old_nickname: String,
        new_nickname: String,
        style: Option<Style>,
    ) -> Result<(), EventError> {
        let nickname = Nickname::new(new_nickname).map_err(|_| EventError::EmptyNickname)?;

        let room_id = self
            .repository
            .update_nickname(id, nickname.clone(), style)
            .await
            .map_err(|_| EventError::NotJoined)?;
        tracing::info!(
            "'{}' changed nickname to '{}' in room '{}'",
            old_nickname,
            nickname,
            room_id
        );

        self.broadcast
            .broadcast(
                &room_id,
                format!("{} changed nickname to {}", old_nickname, nickname),
                None,
            )
            .await;
        self.broadcast.broadcast_user_list(&room_id).await;
        Ok(())
    }
}
