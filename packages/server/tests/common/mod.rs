//! Helpers shared by the integration tests.
//!
//! Each test starts its own in-process server on an ephemeral port, so tests
//! can run in parallel without sharing rooms.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::broadcaster::WebSocketBroadcaster,
    ui::{AppState, build_router},
    usecase::new_coordinator,
};
use hiroba_shared::time::FixedClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// 2023-01-01 15:07:00 UTC
pub const NOW: i64 = 1_672_531_200_000 + (15 * 3600 + 7 * 60) * 1000;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage an in-process server
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = AppState::new(
            new_coordinator(),
            Arc::new(WebSocketBroadcaster::new(0)),
            Arc::new(FixedClock::new(NOW)),
            0,
        );
        let app = build_router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, handle }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn connect(&self) -> TestClient {
        TestClient::connect(&self.ws_url()).await
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = reqwest::get(self.http_url(path)).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct to drive one WebSocket connection
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url).await.unwrap();
        Self { stream }
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_raw(&value.to_string()).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream.send(Message::Text(text.into())).await.unwrap();
    }

    /// Receive the next text frame as JSON, failing after a timeout
    pub async fn recv_json(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for an event")
                .expect("connection closed")
                .unwrap();
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Assert that no event arrives within a short window
    pub async fn expect_silence(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(200), self.stream.next()).await;
        if let Ok(Some(Ok(Message::Text(text)))) = result {
            panic!("unexpected event: {}", text.as_str());
        }
    }

    /// Join a room and return the `history` event after consuming our own `joined`
    pub async fn join(&mut self, username: &str, room_id: &str) -> Value {
        self.send_json(json!({"type": "join", "username": username, "room_id": room_id}))
            .await;
        let history = self.recv_json().await;
        assert_eq!(history["type"], "history");
        let joined = self.recv_json().await;
        assert_eq!(joined["type"], "presence");
        assert_eq!(joined["kind"], "joined");
        history
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}
