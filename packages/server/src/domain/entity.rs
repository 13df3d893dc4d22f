//! Entities: the per-connection session and the room.

use super::{
    error::DomainError,
    value_object::{ConnectionId, Nickname, Password, RoomId, Style, Timestamp},
};

/// Lifecycle of a session.
///
/// ```text
/// Unjoined --join--> Joined --close--> Closed
///     \______________close_____________/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unjoined,
    Joined,
    Closed,
}

/// Mutable per-connection identity.
///
/// `room` is `Some` iff `state` is `Joined`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: ConnectionId,
    pub nickname: Option<Nickname>,
    pub style: Option<Style>,
    pub room: Option<RoomId>,
    pub state: SessionState,
}

impl Session {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            nickname: None,
            style: None,
            room: None,
            state: SessionState::Unjoined,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.state == SessionState::Joined
    }

    /// Unjoined -> Joined.
    pub fn join(
        &mut self,
        room: RoomId,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<(), DomainError> {
        match self.state {
            SessionState::Unjoined => {
                self.room = Some(room);
                self.nickname = Some(nickname);
                self.style = style;
                self.state = SessionState::Joined;
                Ok(())
            }
            SessionState::Joined => Err(DomainError::AlreadyJoined),
            SessionState::Closed => Err(DomainError::SessionClosed),
        }
    }

    /// Replace the nickname, and the style if one is supplied.
    ///
    /// Returns the room the change must be announced in.
    pub fn rename(
        &mut self,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<RoomId, DomainError> {
        let room = self.joined_room()?;
        self.nickname = Some(nickname);
        if style.is_some() {
            self.style = style;
        }
        Ok(room)
    }

    /// Replace the style. Returns the room whose roster changed.
    pub fn restyle(&mut self, style: Option<Style>) -> Result<RoomId, DomainError> {
        let room = self.joined_room()?;
        self.style = style;
        Ok(room)
    }

    /// Any state -> Closed. Returns the room the session was in, if any.
    ///
    /// Closing an already closed session is a no-op returning `None`.
    pub fn close(&mut self) -> Option<RoomId> {
        self.state = SessionState::Closed;
        self.room.take()
    }

    fn joined_room(&self) -> Result<RoomId, DomainError> {
        match (self.state, &self.room) {
            (SessionState::Joined, Some(room)) => Ok(room.clone()),
            (SessionState::Closed, _) => Err(DomainError::SessionClosed),
            _ => Err(DomainError::NotJoined),
        }
    }
}

/// A named broadcast domain with an optional shared password.
///
/// Members are kept in join order; membership is unique.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    password: Option<Password>,
    members: Vec<ConnectionId>,
}

impl Room {
    pub fn new(id: RoomId, password: Option<Password>, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            password,
            members: Vec::new(),
        }
    }

    /// A room without a password admits everyone, regardless of what they supply.
    pub fn admits(&self, supplied: Option<&Password>) -> bool {
        match &self.password {
            None => true,
            Some(password) => supplied == Some(password),
        }
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn add_member(&mut self, id: ConnectionId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Returns `true` if the connection was a member.
    pub fn remove_member(&mut self, id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != id);
        self.members.len() != before
    }

    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One line of a room's roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub nickname: Nickname,
    pub style: Option<Style>,
}

/// Roster of a room together with the connections it must be sent to,
/// read in one consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub recipients: Vec<ConnectionId>,
    pub entries: Vec<RosterEntry>,
}

/// Read-only view of a room, used by the HTTP API.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub has_password: bool,
    pub created_at: Timestamp,
    pub roster: Vec<RosterEntry>,
}

/// Result of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_created: bool,
}

/// What a closing session left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Departure {
    /// Room the session was a member of.
    pub room: Option<RoomId>,
    /// Nickname the session had when it closed.
    pub nickname: Option<Nickname>,
    /// Whether the room was removed because it became empty.
    pub room_removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn nickname(value: &str) -> Nickname {
        Nickname::new(value.to_string()).unwrap()
    }

    fn password(value: &str) -> Option<Password> {
        Password::from_optional(Some(value.to_string()))
    }

    #[test]
    fn test_new_session_is_unjoined_and_empty() {
        // テスト項目: 新しいセッションは未参加状態で、識別情報を持たない
        // given (前提条件):
        let id = ConnectionId::generate();

        // when (操作):
        let session = Session::new(id);

        // then (期待する結果):
        assert_eq!(session.state, SessionState::Unjoined);
        assert_eq!(session.nickname, None);
        assert_eq!(session.style, None);
        assert_eq!(session.room, None);
    }

    #[test]
    fn test_session_join_sets_identity() {
        // テスト項目: join でルーム・ニックネーム・スタイルが設定され Joined に遷移する
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());
        let style = Some(Style::new(json!("red")));

        // when (操作):
        let result = session.join(room_id("r1"), nickname("Alice"), style.clone());

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(session.is_joined());
        assert_eq!(session.room, Some(room_id("r1")));
        assert_eq!(session.nickname, Some(nickname("Alice")));
        assert_eq!(session.style, style);
    }

    #[test]
    fn test_session_join_twice_is_rejected() {
        // テスト項目: 参加済みのセッションは再度 join できない
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());
        session
            .join(room_id("r1"), nickname("Alice"), None)
            .unwrap();

        // when (操作):
        let result = session.join(room_id("r2"), nickname("Alice"), None);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::AlreadyJoined));
        assert_eq!(session.room, Some(room_id("r1")));
    }

    #[test]
    fn test_session_rename_keeps_style_when_none_supplied() {
        // テスト項目: スタイル未指定のニックネーム変更ではスタイルが維持される
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());
        let style = Some(Style::new(json!("red")));
        session
            .join(room_id("r1"), nickname("Alice"), style.clone())
            .unwrap();

        // when (操作):
        let result = session.rename(nickname("Alicia"), None);

        // then (期待する結果):
        assert_eq!(result, Ok(room_id("r1")));
        assert_eq!(session.nickname, Some(nickname("Alicia")));
        assert_eq!(session.style, style);
    }

    #[test]
    fn test_session_rename_replaces_style_when_supplied() {
        // テスト項目: スタイル指定のニックネーム変更ではスタイルも更新される
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());
        session
            .join(
                room_id("r1"),
                nickname("Alice"),
                Some(Style::new(json!("red"))),
            )
            .unwrap();

        // when (操作):
        session
            .rename(nickname("Alicia"), Some(Style::new(json!("blue"))))
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.style, Some(Style::new(json!("blue"))));
    }

    #[test]
    fn test_session_updates_require_joined_state() {
        // テスト項目: 未参加のセッションではニックネーム・スタイル変更ができない
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());

        // when (操作):
        let rename = session.rename(nickname("Alice"), None);
        let restyle = session.restyle(Some(Style::new(json!("red"))));

        // then (期待する結果):
        assert_eq!(rename, Err(DomainError::NotJoined));
        assert_eq!(restyle, Err(DomainError::NotJoined));
        assert_eq!(session.nickname, None);
        assert_eq!(session.style, None);
    }

    #[test]
    fn test_session_close_is_idempotent() {
        // テスト項目: close はルームを返し、二回目以降は何も返さない
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate());
        session
            .join(room_id("r1"), nickname("Alice"), None)
            .unwrap();

        // when (操作):
        let first = session.close();
        let second = session.close();

        // then (期待する結果):
        assert_eq!(first, Some(room_id("r1")));
        assert_eq!(second, None);
        assert_eq!(session.state, SessionState::Closed);
        assert_eq!(session.restyle(None), Err(DomainError::SessionClosed));
    }

    #[test]
    fn test_room_without_password_admits_anyone() {
        // テスト項目: パスワードなしのルームは任意のパスワードで入室できる
        // given (前提条件):
        let room = Room::new(room_id("r1"), None, Timestamp::new(0));

        // when (操作) / then (期待する結果):
        assert!(room.admits(None));
        assert!(room.admits(password("x").as_ref()));
    }

    #[test]
    fn test_room_with_password_requires_exact_match() {
        // テスト項目: パスワード付きのルームは一致するパスワードでのみ入室できる
        // given (前提条件):
        let room = Room::new(room_id("r1"), password("secret"), Timestamp::new(0));

        // when (操作) / then (期待する結果):
        assert!(room.has_password());
        assert!(room.admits(password("secret").as_ref()));
        assert!(!room.admits(password("wrong").as_ref()));
        assert!(!room.admits(None));
    }

    #[test]
    fn test_room_membership_is_unique_and_ordered() {
        // テスト項目: メンバーは重複せず、参加順に保持される
        // given (前提条件):
        let mut room = Room::new(room_id("r1"), None, Timestamp::new(0));
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when (操作):
        room.add_member(alice);
        room.add_member(bob);
        room.add_member(alice);

        // then (期待する結果):
        assert_eq!(room.members(), &[alice, bob]);
        assert_eq!(room.member_count(), 2);
    }

    #[test]
    fn test_room_remove_member() {
        // テスト項目: メンバー削除の結果が正しく返され、最後の一人で空になる
        // given (前提条件):
        let mut room = Room::new(room_id("r1"), None, Timestamp::new(0));
        let alice = ConnectionId::generate();
        room.add_member(alice);

        // when (操作):
        let removed = room.remove_member(&alice);
        let removed_again = room.remove_member(&alice);

        // then (期待する結果):
        assert!(removed);
        assert!(!removed_again);
        assert!(room.is_empty());
    }
}
