//! Test doubles shared by the use case tests.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, Nickname, PusherChannel, RoomId,
        ServerEvent,
    },
    infrastructure::repository::InMemoryRoomRepository,
};

use super::{
    BroadcastService, ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRequest,
    JoinRoomUseCase, SendMessageUseCase, UpdateNicknameUseCase, UpdateStyleUseCase,
};

pub(crate) fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub(crate) fn nickname(value: &str) -> Nickname {
    Nickname::new(value.to_string()).unwrap()
}

pub(crate) fn join_request(room: &str, password: Option<&str>, nickname: &str) -> JoinRequest {
    JoinRequest {
        room_id: Some(room.to_string()),
        password: password.map(str::to_string),
        nickname: Some(nickname.to_string()),
        style: None,
    }
}

/// MessagePusher that records every delivered event per connection, in
/// delivery order. Unregistered connections are skipped like the real pusher.
#[derive(Default)]
pub(crate) struct RecordingPusher {
    registered: Mutex<HashSet<ConnectionId>>,
    delivered: Mutex<Vec<(ConnectionId, ServerEvent)>>,
}

impl RecordingPusher {
    pub(crate) async fn events_for(&self, id: ConnectionId) -> Vec<ServerEvent> {
        self.delivered
            .lock()
            .await
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub(crate) async fn clear(&self) {
        self.delivered.lock().await.clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, client_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().await.insert(client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        self.registered.lock().await.remove(client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        if !self.registered.lock().await.contains(client_id) {
            return Err(MessagePushError::ClientNotFound(client_id.to_string()));
        }
        self.delivered
            .lock()
            .await
            .push((*client_id, event.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let registered = self.registered.lock().await.clone();
        let mut delivered = self.delivered.lock().await;
        for target in targets.iter().filter(|t| registered.contains(*t)) {
            delivered.push((*target, event.clone()));
        }
        Ok(())
    }
}

/// Real repository + recording pusher, with every use case wired up.
pub(crate) struct TestHarness {
    pub(crate) repository: Arc<InMemoryRoomRepository>,
    pub(crate) pusher: Arc<RecordingPusher>,
    pub(crate) broadcast: Arc<BroadcastService>,
    pub(crate) connect: ConnectParticipantUseCase,
    pub(crate) join: JoinRoomUseCase,
    pub(crate) update_nickname: UpdateNicknameUseCase,
    pub(crate) update_style: UpdateStyleUseCase,
    pub(crate) send_message: SendMessageUseCase,
    pub(crate) disconnect: DisconnectParticipantUseCase,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = Arc::new(RecordingPusher::default());
        let broadcast = Arc::new(BroadcastService::new(repository.clone(), pusher.clone()));
        Self {
            connect: ConnectParticipantUseCase::new(repository.clone(), pusher.clone()),
            join: JoinRoomUseCase::new(repository.clone(), broadcast.clone()),
            update_nickname: UpdateNicknameUseCase::new(repository.clone(), broadcast.clone()),
            update_style: UpdateStyleUseCase::new(repository.clone(), broadcast.clone()),
            send_message: SendMessageUseCase::new(repository.clone(), broadcast.clone()),
            disconnect: DisconnectParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
                broadcast.clone(),
            ),
            repository,
            pusher,
            broadcast,
        }
    }

    /// Register a new, unjoined connection.
    pub(crate) async fn connected(&self) -> ConnectionId {
        let (tx, _rx) = mpsc::unbounded_channel();
        self.connect.execute(tx).await
    }

    /// Register a new connection and join it to `room` without a password.
    pub(crate) async fn joined(&self, room: &str, name: &str) -> ConnectionId {
        let id = self.connected().await;
        self.join
            .execute(id, join_request(room, None, name))
            .await
            .unwrap();
        id
    }
}
