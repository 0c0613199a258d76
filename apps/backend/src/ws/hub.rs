//! Room registry: which websocket connections belong to which game.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::warn;

use crate::domain::player::ConnectionId;
use crate::ws::protocol::ServerMsg;

/// A pre-serialized frame pushed to every member of a room.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent {
    pub payload: Arc<str>,
}

#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, DashMap<ConnectionId, Recipient<RoomEvent>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn register(&self, game_id: &str, conn: ConnectionId, recipient: Recipient<RoomEvent>) {
        let room = self
            .rooms
            .entry(game_id.to_string())
            .or_insert_with(DashMap::new);
        room.insert(conn, recipient);
    }

    pub fn unregister(&self, game_id: &str, conn: ConnectionId) {
        let now_empty = match self.rooms.get(game_id) {
            Some(room) => {
                room.remove(&conn);
                room.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.rooms.remove_if(game_id, |_, room| room.is_empty());
        }
    }

    /// Serialize `msg` once and push it to every member of the room.
    pub fn broadcast(&self, game_id: &str, msg: &ServerMsg) {
        let payload: Arc<str> = match serde_json::to_string(msg) {
            Ok(text) => text.into(),
            Err(err) => {
                warn!(error = %err, game_id, "[WS HUB] failed to serialize broadcast");
                return;
            }
        };
        if let Some(room) = self.rooms.get(game_id) {
            for member in room.iter() {
                member.value().do_send(RoomEvent {
                    payload: payload.clone(),
                });
            }
        }
    }

    pub fn room_size(&self, game_id: &str) -> usize {
        self.rooms.get(game_id).map(|room| room.len()).unwrap_or(0)
    }

    pub fn active_connections_count(&self) -> usize {
        self.rooms.iter().map(|room| room.len()).sum()
    }
}
