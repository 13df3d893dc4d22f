//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: one drains the connection's outbound
//! channel into the socket, the other parses inbound frames and dispatches
//! them to the use cases. When either ends the connection is closed exactly
//! once.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::InboundMessage,
    ui::state::AppState,
    usecase::JoinRequest,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_participant_usecase.execute(tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let state_clone = state.clone();

    // Spawn a task to receive messages from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push outbound messages to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let departure = state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed (room: {:?}, room removed: {})",
        connection_id,
        departure.room.as_ref().map(|room| room.as_str()),
        departure.room_removed
    );
}

/// Parse one inbound frame and hand it to the matching use case.
///
/// Unparseable frames are dropped. Events rejected because of the session
/// state are dropped without notifying the client.
async fn dispatch(state: &AppState, id: ConnectionId, text: &str) {
    let message = match serde_json::from_str::<InboundMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping unparseable frame from '{}': {}", id, e);
            return;
        }
    };

    match message {
        InboundMessage::Join(payload) => {
            let request = JoinRequest {
                room_id: payload.room_id,
                password: payload.password,
                nickname: payload.nickname,
                style: payload.style,
            };
            if let Err(e) = state.join_room_usecase.execute(id, request).await {
                tracing::debug!("Join from '{}' rejected: {}", id, e);
            }
        }
        InboundMessage::UpdateNickname(payload) => {
            if let Err(e) = state
                .update_nickname_usecase
                .execute(
                    id,
                    payload.old_nickname,
                    payload.new_nickname,
                    payload.style,
                )
                .await
            {
                tracing::debug!("Dropping update_nickname from '{}': {}", id, e);
            }
        }
        InboundMessage::UpdateStyle(payload) => {
            if let Err(e) = state.update_style_usecase.execute(id, payload.style).await {
                tracing::debug!("Dropping update_style from '{}': {}", id, e);
            }
        }
        InboundMessage::Chat(payload) => {
            if let Err(e) = state
                .send_message_usecase
                .execute(id, payload.nickname, payload.text, payload.style)
                .await
            {
                tracing::debug!("Dropping chat from '{}': {}", id, e);
            }
        }
    }
}
