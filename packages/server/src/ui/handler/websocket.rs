//! WebSocket connection handlers.
//!
//! The handshake is authenticated and the connection registered before the upgrade,
//! so a rejected client never appears online. After the upgrade one task writes
//! outbound events and one task drains inbound frames; when either ends the
//! session is closed.

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    domain::{Connection, OutboundEvent},
    infrastructure::dto::websocket::{NewMessageMessage, OnlineUsersMessage},
    ui::{
        error::ApiError,
        state::{AppState, ConnectQuery},
    },
    usecase::{ConnectUserUseCase, ConnectionSession},
};

/// Close code sent to a connection replaced by a newer one for the same user
pub const SUPERSEDED_CLOSE_CODE: u16 = 4000;

/// Close code sent when the connection's owner logs out
pub const SESSION_ENDED_CLOSE_CODE: u16 = 4001;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (connection, rx) = Connection::open();
    let connect_usecase = ConnectUserUseCase::new(state.sessions.clone(), state.registry.clone());

    let session = match connect_usecase
        .execute(query.token.as_deref(), connection)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "WebSocket handshake rejected");
            return Err(e.into());
        }
    };

    // If the upgrade never completes the session is dropped here, which
    // schedules the same cleanup as a normal close.
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, session, rx)))
}

enum Frame {
    Text(String),
    Close(u16, &'static str),
}

fn encode(event: &OutboundEvent) -> Result<Frame, serde_json::Error> {
    match event {
        OutboundEvent::PresenceUpdate(user_ids) => {
            serde_json::to_string(&OnlineUsersMessage::new(user_ids)).map(Frame::Text)
        }
        OutboundEvent::NewMessage(message) => {
            serde_json::to_string(&NewMessageMessage::new(message)).map(Frame::Text)
        }
        OutboundEvent::Superseded => Ok(Frame::Close(SUPERSEDED_CLOSE_CODE, "superseded")),
        OutboundEvent::SessionEnded => Ok(Frame::Close(SESSION_ENDED_CLOSE_CODE, "logged out")),
    }
}

async fn handle_socket(
    socket: WebSocket,
    session: ConnectionSession,
    mut rx: UnboundedReceiver<OutboundEvent>,
) {
    let (mut sender, mut receiver) = socket.split();
    let user_id = session.user_id().clone();
    tracing::info!(user_id = %user_id, connection_id = %session.connection().id(), "WebSocket opened");

    // Spawn a task to write queued events to this client
    let writer_user = user_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = match encode(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(user_id = %writer_user, error = %e, "Failed to encode frame");
                    continue;
                }
            };
            match frame {
                Frame::Text(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Frame::Close(code, reason) => {
                    tracing::info!(user_id = %writer_user, code, reason, "Closing connection");
                    let close = CloseFrame {
                        code,
                        reason: Utf8Bytes::from_static(reason),
                    };
                    let _ = sender.send(Message::Close(Some(close))).await;
                    break;
                }
            }
        }
    });

    // Spawn a task to drain frames from this client
    let reader_user = user_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_)) => {
                    tracing::debug!(user_id = %reader_user, "Ignoring inbound text frame");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(user_id = %reader_user, "Client requested close");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(user_id = %reader_user, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    session.close().await;
    tracing::info!(user_id = %user_id, "WebSocket closed");
}
