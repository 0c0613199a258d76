use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::sessions::SessionRegistry;
use crate::ws::hub::RoomRegistry;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Live game sessions keyed by join code
    pub sessions: Arc<SessionRegistry>,
    /// Websocket rooms keyed by join code
    pub rooms: Arc<RoomRegistry>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(config.game_rules())),
            rooms: Arc::new(RoomRegistry::new()),
            config,
        }
    }

    /// Default configuration, for tests and tools.
    pub fn for_tests() -> Self {
        Self::new(ServerConfig::default())
    }
}
