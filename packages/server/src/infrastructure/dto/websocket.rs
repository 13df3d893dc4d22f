//! WebSocket envelope DTOs.
//!
//! Inbound frames are `{"type": ..., "payload": {...}}` with camelCase
//! payload fields. Outbound frames are flat: `{"type": ..., ...fields}`.

use serde::{Deserialize, Serialize};

use crate::domain::Style;

/// Client-to-server envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InboundMessage {
    Join(JoinPayload),
    UpdateNickname(UpdateNicknamePayload),
    UpdateStyle(UpdateStylePayload),
    Chat(ChatPayload),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNicknamePayload {
    #[serde(default)]
    pub old_nickname: String,
    #[serde(default)]
    pub new_nickname: String,
    #[serde(default)]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateStylePayload {
    #[serde(default)]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: Option<Style>,
}

/// Server-to-client envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Error { message: String },
    JoinSuccess { message: String },
    Chat { text: String, style: Option<Style> },
    UserList { users: Vec<UserInfo> },
}

/// One roster line on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub nickname: String,
    pub style: Option<Style>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_message() {
        // テスト項目: join メッセージが camelCase のペイロードから読み込まれる
        // given (前提条件):
        let raw = r#"{"type":"join","payload":{"roomId":"r1","password":"secret","nickname":"Alice","style":{"color":"red"}}}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            InboundMessage::Join(JoinPayload {
                room_id: Some("r1".to_string()),
                password: Some("secret".to_string()),
                nickname: Some("Alice".to_string()),
                style: Some(Style::new(json!({"color": "red"}))),
            })
        );
    }

    #[test]
    fn test_parse_join_message_with_missing_fields() {
        // テスト項目: 必須項目が欠けた join もパースでき、検証は UseCase に任される
        // given (前提条件):
        let raw = r#"{"type":"join","payload":{"nickname":"Alice"}}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        let InboundMessage::Join(payload) = message else {
            panic!("expected join message");
        };
        assert_eq!(payload.room_id, None);
        assert_eq!(payload.password, None);
        assert_eq!(payload.style, None);
    }

    #[test]
    fn test_parse_update_nickname_message() {
        // テスト項目: update_nickname メッセージが読み込まれる
        // given (前提条件):
        let raw = r#"{"type":"update_nickname","payload":{"oldNickname":"Alice","newNickname":"Alicia"}}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            InboundMessage::UpdateNickname(UpdateNicknamePayload {
                old_nickname: "Alice".to_string(),
                new_nickname: "Alicia".to_string(),
                style: None,
            })
        );
    }

    #[test]
    fn test_parse_update_style_with_null_style() {
        // テスト項目: null のスタイルは「スタイルなし」として読み込まれる
        // given (前提条件):
        let raw = r#"{"type":"update_style","payload":{"style":null}}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            InboundMessage::UpdateStyle(UpdateStylePayload { style: None })
        );
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        // テスト項目: 未知の type はパースエラーになる
        // given (前提条件):
        let raw = r#"{"type":"shout","payload":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_outbound_messages() {
        // テスト項目: 送信メッセージが期待どおりの JSON 形式になる
        // given (前提条件):
        let chat = OutboundMessage::Chat {
            text: "Alice: hi".to_string(),
            style: Some(Style::new(json!("red"))),
        };
        let system = OutboundMessage::Chat {
            text: "Alice has joined".to_string(),
            style: None,
        };
        let users = OutboundMessage::UserList {
            users: vec![UserInfo {
                nickname: "Alice".to_string(),
                style: None,
            }],
        };

        // when (操作) / then (期待する結果):
        assert_eq!(
            serde_json::to_value(&chat).unwrap(),
            json!({"type": "chat", "text": "Alice: hi", "style": "red"})
        );
        assert_eq!(
            serde_json::to_value(&system).unwrap(),
            json!({"type": "chat", "text": "Alice has joined", "style": null})
        );
        assert_eq!(
            serde_json::to_value(&users).unwrap(),
            json!({"type": "user_list", "users": [{"nickname": "Alice", "style": null}]})
        );
    }
}
