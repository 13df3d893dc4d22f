//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `ServerEvent` を JSON にシリアライズして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! ブロードキャストでは送信先の sender をロック内でコピーし、ロック解放後に送信します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::websocket::OutboundMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id, tx).await;
/// pusher.push_to(&connection_id, &ServerEvent::JoinSuccess).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のクライアント数
    pub async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }

    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&OutboundMessage::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let sender = {
            let clients = self.clients.lock().await;
            clients
                .get(client_id)
                .cloned()
                .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?
        };

        let content = Self::encode(event)?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to client '{}'", client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;

        let senders: Vec<(ConnectionId, Option<PusherChannel>)> = {
            let clients = self.clients.lock().await;
            targets
                .iter()
                .map(|target| (*target, clients.get(target).cloned()))
                .collect()
        };

        for (target, sender) in senders {
            // 切断済みのクライアントはスキップ（エラーにしない）
            let Some(sender) = sender else {
                tracing::debug!("Client '{}' not found during broadcast, skipping", target);
                continue;
            };
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push message to client '{}': {}", target, e);
            } else {
                tracing::debug!("Broadcasted message to client '{}'", target);
            }
        }

        Ok(())
    }
}
