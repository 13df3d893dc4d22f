//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入力検証、パスワード検証、参加時の通知順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成、既存ルームへの参加
//! - 異常系：ルーム ID / ニックネームの欠落、パスワード不一致、二重参加
//! - エッジケース：パスワードなしルームへのパスワード付き参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, Nickname, Password, RepositoryError, RoomId, RoomRepository,
    ServerEvent, Style,
};

use super::{BroadcastService, error::JoinError};

/// Raw join request as supplied by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRequest {
    pub room_id: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub style: Option<Style>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcast: Arc<BroadcastService>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcast: Arc<BroadcastService>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }

    /// ルーム参加を実行
    ///
    /// 成功時はルーム全体に入室メッセージと名簿を送り、その後で参加者本人に
    /// `join_success` を送る。`Validation` / `Auth` の失敗は本人にのみ
    /// `error` として通知し、状態は変更しない。
    pub async fn execute(
        &self,
        id: ConnectionId,
        request: JoinRequest,
    ) -> Result<JoinOutcome, JoinError> {
        let result = self.join(id, request).await;
        if let Err(e) = &result {
            if e.is_reported() {
                self.broadcast
                    .send_to(&id, &ServerEvent::error(e.to_string()))
                    .await;
            }
        }
        result
    }

    async fn join(&self, id: ConnectionId, request: JoinRequest) -> Result<JoinOutcome, JoinError> {
        let room_id = RoomId::new(request.room_id.unwrap_or_default());
        let nickname = Nickname::new(request.nickname.unwrap_or_default());
        let (Ok(room_id), Ok(nickname)) = (room_id, nickname) else {
            tracing::warn!("Connection '{}' sent join without room id or nickname", id);
            return Err(JoinError::Validation);
        };
        let password = Password::from_optional(request.password);

        let outcome = self
            .repository
            .join_room(
                id,
                room_id.clone(),
                password,
                nickname.clone(),
                request.style,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::PasswordMismatch(_) => {
                    tracing::warn!("Connection '{}' failed to join '{}': {}", id, room_id, e);
                    JoinError::Auth
                }
                other => JoinError::InvalidSession(other.to_string()),
            })?;

        if outcome.room_created {
            tracing::info!("Room '{}' created", room_id);
        }
        tracing::info!("'{}' ({}) joined room '{}'", nickname, id, room_id);

        self.broadcast
            .broadcast(&room_id, format!("{} has joined", nickname), None)
            .await;
        self.broadcast.broadcast_user_list(&room_id).await;
        self.broadcast.send_to(&id, &ServerEvent::JoinSuccess).await;

        Ok(outcome)
    }
}
