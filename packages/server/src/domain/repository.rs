//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御
//!
//! 実装は、ルームのメンバー集合とルームレジストリの変更を一つの操作として
//! アトミックに行う必要があります。同じ未知のルーム ID への同時 join で
//! ルームが二つ作られてはならず、ルームを空にする退室と同じルーム ID への
//! join が競合してはなりません。

use async_trait::async_trait;

use super::{
    ConnectionId, Departure, JoinOutcome, Nickname, Password, RepositoryError, RoomId,
    RoomSnapshot, Roster, Style,
};

/// Room Registry + session table.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい接続のセッションを Unjoined 状態で登録
    async fn register_session(&self, id: ConnectionId);

    /// ルームに参加する
    ///
    /// ルームが存在しなければ `password` 付きで作成し、無条件に入室させる。
    /// 存在する場合はパスワードを検証し、不一致なら状態を一切変更しない。
    async fn join_room(
        &self,
        id: ConnectionId,
        room_id: RoomId,
        password: Option<Password>,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<JoinOutcome, RepositoryError>;

    /// ニックネームを変更し、変更を通知すべきルームを返す
    async fn update_nickname(
        &self,
        id: ConnectionId,
        nickname: Nickname,
        style: Option<Style>,
    ) -> Result<RoomId, RepositoryError>;

    /// スタイルを変更し、名簿が変わったルームを返す
    async fn update_style(
        &self,
        id: ConnectionId,
        style: Option<Style>,
    ) -> Result<RoomId, RepositoryError>;

    /// 参加中のルームを取得（未参加・切断済みなら `None`）
    async fn joined_room(&self, id: ConnectionId) -> Option<RoomId>;

    /// セッションを閉じ、ルームから削除する（冪等）
    ///
    /// ルームが空になった場合は同じ操作の中でルームも削除する。
    async fn close_session(&self, id: ConnectionId) -> Departure;

    /// ルームの参加中メンバーの接続 ID を取得（ルームがなければ `None`）
    async fn get_member_ids(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>>;

    /// ルームの名簿と送信先を同じスナップショットから取得（ルームがなければ `None`）
    async fn get_roster(&self, room_id: &RoomId) -> Option<Roster>;

    /// 全ルームのスナップショットを取得
    async fn get_rooms(&self) -> Vec<RoomSnapshot>;

    /// ルームのスナップショットを取得
    async fn get_room(&self, room_id: &RoomId) -> Option<RoomSnapshot>;
}
