//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! ルームレジストリとセッションテーブルを一つの `RwLock` の中に保持します。
//!
//! ## ロックの規律
//!
//! - 状態を変更する操作（join / update / close）は書き込みロックを取り、
//!   ルームの作成・削除とメンバー集合の変更を一度に行う
//! - 読み取り（メンバー一覧・名簿）は読み取りロックでスナップショットを返す
//! - ロックを保持したまま送信は行わない（送信は UseCase が返却後に行う）

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::RwLock;

use crate::domain::{
    ConnectionId, Departure, JoinOutcome, Nickname, Password, RepositoryError, Room, RoomId,
    RoomRepository, RoomSnapshot, Roster, RosterEntry, Session, Style, Timestamp,
};

#[derive(Default)]
struct Registry {
    rooms: HashMap<RoomId, Room>,
    sessions: HashMap<ConnectionId, Session>,
}

impl Registry {
    fn session_mut(&mut self, id: ConnectionId) -> Result<&mut Session, RepositoryError> {
        self.sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.to_string()))
    }

    /// Joined members of a room, in join order.
    fn joined_members<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Session> + 'a {
        room.members()
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .filter(|session| session.is_joined())
    }

    fn roster(&self, room: &Room) -> Vec<RosterEntry> {
        self.joined_members(room)
            .filter_map(|session| {
                session.nickname.clone().map(|nickname| RosterEntry {
                    nickname,
                    style: session.style.clone(),
                })
            })
            .collect()
    }

    fn snapshot(&self, room: &Room) -> RoomSnapshot {
        RoomSnapshot {
            id: room.id.clone(),
            has_password: room.has_password(),
            created_at: room.created_at,
            roster: self.roster(room),
        }
    }
}

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    registry: RwLock<Registry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// ルーム作成時刻の取得元を指定して作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            clock,
        }
    }

    /// 現在存在するルーム数
    pub async fn count_rooms(&self) -> usize {
        self.registry.read().await.rooms.len()
    }

    /// 登録中のセッション数
    pub async fn count_sessions(&self) -> usize {
        self.registry.read().await.sessions.len()
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register_session(&self, id: ConnectionId) {
        let mut registry = self.registry.write().await;
        registry
            .sessions
            .entry(id)
            .or_insert_with(|| Session::new(id));
    }

    async fn join_room(
        &self,
        id: ConnectionId,
        room_id: RoomId,
        password: Option<Password>,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<JoinOutcome, RepositoryError> {
        let mut registry = self.registry.write().await;
        let Registry { rooms, sessions } = &mut *registry;

        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.to_string()))?;

        if let Some(room) = rooms.get(&room_id) {
            if !room.admits(password.as_ref()) {
                return Err(RepositoryError::PasswordMismatch(room_id.into_string()));
            }
        }

        // Validate the transition before touching the registry so a rejected
        // join leaves no trace.
        session.join(room_id.clone(), nickname, style)?;

        let room_created = !rooms.contains_key(&room_id);
        let created_at = Timestamp::new(self.clock.now_millis());
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id, password, created_at))
            .add_member(id);

        Ok(JoinOutcome { room_created })
    }

    async fn update_nickname(
        &self,
        id: ConnectionId,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<RoomId, RepositoryError> {
        let mut registry = self.registry.write().await;
        let room = registry.session_mut(id)?.rename(nickname, style)?;
        Ok(room)
    }

    async fn update_style(
        &self,
        id: ConnectionId,
        style: Option<Style>,
    ) -> Result<RoomId, RepositoryError> {
        let mut registry = self.registry.write().await;
        let room = registry.session_mut(id)?.restyle(style)?;
        Ok(room)
    }

    async fn joined_room(&self, id: ConnectionId) -> Option<RoomId> {
        let registry = self.registry.read().await;
        registry
            .sessions
            .get(&id)
            .filter(|session| session.is_joined())
            .and_then(|session| session.room.clone())
    }

    async fn close_session(&self, id: ConnectionId) -> Departure {
        let mut registry = self.registry.write().await;

        // Closed sessions are dropped from the table; an unknown id is
        // therefore an already-closed session.
        let Some(mut session) = registry.sessions.remove(&id) else {
            return Departure::default();
        };
        let nickname = session.nickname.clone();
        let Some(room_id) = session.close() else {
            return Departure {
                room: None,
                nickname,
                room_removed: false,
            };
        };

        let mut room_removed = false;
        if let Some(room) = registry.rooms.get_mut(&room_id) {
            room.remove_member(&id);
            if room.is_empty() {
                registry.rooms.remove(&room_id);
                room_removed = true;
            }
        }

        Departure {
            room: Some(room_id),
            nickname,
            room_removed,
        }
    }

    async fn get_member_ids(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>> {
        let registry = self.registry.read().await;
        let room = registry.rooms.get(room_id)?;
        Some(
            registry
                .joined_members(room)
                .map(|session| session.id)
                .collect(),
        )
    }

    async fn get_roster(&self, room_id: &RoomId) -> Option<Roster> {
        let registry = self.registry.read().await;
        let room = registry.rooms.get(room_id)?;
        Some(Roster {
            recipients: registry
                .joined_members(room)
                .map(|session| session.id)
                .collect(),
            entries: registry.roster(room),
        })
    }

    async fn get_rooms(&self) -> Vec<RoomSnapshot> {
        let registry = self.registry.read().await;
        let mut rooms: Vec<RoomSnapshot> = registry
            .rooms
            .values()
            .map(|room| registry.snapshot(room))
            .collect();
        rooms.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        rooms
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let registry = self.registry.read().await;
        registry
            .rooms
            .get(room_id)
            .map(|room| registry.snapshot(room))
    }
}
