//! Test fixtures: an in-process server on an ephemeral port.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use chatty_server::{
    infrastructure::repository::inmemory::message::DEFAULT_MESSAGE_CAPACITY,
    ui::{AppState, build_router, serve},
};
use futures_util::StreamExt;
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_capacity(DEFAULT_MESSAGE_CAPACITY).await
    }

    pub async fn start_with_capacity(message_capacity: usize) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_router(
            AppState::in_memory(message_capacity),
            "http://localhost:5173",
        )
        .expect("Failed to build router");

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = serve(listener, app, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://{}/ws?token={}", self.addr, token)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A signed-up user: `(user_id, token)`
pub async fn signup(server: &TestServer, full_name: &str, email: &str) -> (String, String) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/signup", server.base_url()))
        .json(&serde_json::json!({"fullName": full_name, "email": email}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    (
        body["_id"].as_str().expect("missing _id").to_string(),
        body["token"].as_str().expect("missing token").to_string(),
    )
}

pub async fn connect(server: &TestServer, token: &str) -> WsStream {
    let (ws, _response) = tokio_tungstenite::connect_async(server.ws_url(token))
        .await
        .expect("Failed to connect WebSocket");
    ws
}

/// Next server frame, skipping ping/pong
pub async fn next_frame(ws: &mut WsStream) -> Message {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("WebSocket stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Ping(_) | Message::Pong(_) => continue,
            other => return other,
        }
    }
}

pub async fn next_json(ws: &mut WsStream) -> serde_json::Value {
    match next_frame(ws).await {
        Message::Text(text) => serde_json::from_str(text.as_str()).expect("Invalid JSON frame"),
        other => panic!("Expected a text frame, got {other:?}"),
    }
}

/// `userIds` of a getOnlineUsers frame
pub async fn next_online_users(ws: &mut WsStream) -> Vec<String> {
    let frame = next_json(ws).await;
    assert_eq!(frame["type"], "getOnlineUsers");
    frame["userIds"]
        .as_array()
        .expect("userIds should be an array")
        .iter()
        .map(|id| id.as_str().expect("id should be a string").to_string())
        .collect()
}

/// Asserts nothing arrives within a short window
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "Unexpected frame: {result:?}");
}

pub fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}
