//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信のインターフェース。
//! ドメイン層は送信手段（WebSocket など）に依存しません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// Outbound channel of one connection, carrying serialized frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery of `ServerEvent`s to connections.
///
/// Sending to a connection that is no longer registered is not fatal:
/// `push_to` reports it, `broadcast` skips it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;
}
