// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Send a text message
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send(&value.to_string()).await
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next text frame parsed as JSON. Control frames are skipped.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(&text)?),
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(other)) => return Err(format!("unexpected frame: {other:?}").into()),
                Some(Err(err)) => return Err(Box::new(err)),
                None => return Err("connection closed".into()),
            }
        }
    }

    /// Read frames until one with the given `type` arrives.
    pub async fn recv_type(&mut self, kind: &str) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            let msg = self.recv_json().await?;
            if msg["type"] == kind {
                return Ok(msg);
            }
        }
    }

    /// Join a game and wait for the `game_joined` reply.
    pub async fn join(
        &mut self,
        game_id: &str,
        name: &str,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        self.send_json(&json!({"type": "join", "game_id": game_id, "name": name}))
            .await?;
        self.recv_type("game_joined").await
    }

    pub async fn join_as_ta(
        &mut self,
        game_id: &str,
        password: &str,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        self.send_json(&json!({
            "type": "join",
            "game_id": game_id,
            "name": "TA",
            "is_ta": true,
            "password": password,
        }))
        .await?;
        self.recv_type("game_joined").await
    }

    pub async fn ta_action(
        &mut self,
        game_id: &str,
        action: &str,
        password: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.send_json(&json!({
            "type": "ta_action",
            "game_id": game_id,
            "action": action,
            "password": password,
        }))
        .await
    }

    pub async fn player_action(
        &mut self,
        game_id: &str,
        action_type: &str,
        action_data: Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.send_json(&json!({
            "type": "player_action",
            "game_id": game_id,
            "action_type": action_type,
            "action_data": action_data,
        }))
        .await
    }
}
