//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RoomRepository},
    usecase::{
        BroadcastService, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
        UpdateNicknameUseCase, UpdateStyleUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// 接続のユースケース
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// 切断のユースケース
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// ルーム参加のユースケース
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// ニックネーム変更のユースケース
    pub update_nickname_usecase: Arc<UpdateNicknameUseCase>,
    /// スタイル変更のユースケース
    pub update_style_usecase: Arc<UpdateStyleUseCase>,
    /// メッセージ送信のユースケース
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ルーム一覧取得のユースケース
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// ルーム詳細取得のユースケース
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl AppState {
    /// Wire every use case on top of one repository and one pusher.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let broadcast = Arc::new(BroadcastService::new(
            repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher,
                broadcast.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                broadcast.clone(),
            )),
            update_nickname_usecase: Arc::new(UpdateNicknameUseCase::new(
                repository.clone(),
                broadcast.clone(),
            )),
            update_style_usecase: Arc::new(UpdateStyleUseCase::new(
                repository.clone(),
                broadcast.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(repository.clone(), broadcast)),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(repository)),
        }
    }
}
