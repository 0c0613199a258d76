//! In-memory registry of live game sessions, keyed by join code.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::game::Game;
use crate::domain::market::RandomDice;
use crate::domain::rules::GameRules;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::join_code::generate_join_code;

const MAX_CODE_ATTEMPTS: usize = 32;

/// One game plus the dice that drive it.
#[derive(Debug)]
pub struct GameSession {
    pub game: Game,
    pub dice: RandomDice,
    last_activity: Instant,
}

impl GameSession {
    pub fn new(id: String, password: &str, rules: GameRules, mut dice: RandomDice) -> Self {
        let game = Game::new(id, password, rules, dice.rng_mut());
        Self {
            game,
            dice,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Shared handle to one session. Hold the lock only for synchronous work.
pub type SessionHandle = Arc<Mutex<GameSession>>;

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
    rules: GameRules,
}

impl SessionRegistry {
    pub fn new(rules: GameRules) -> Self {
        Self {
            sessions: DashMap::new(),
            rules,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Open a new session under a fresh join code, OS-seeded dice.
    pub fn create(&self, password: &str) -> Result<String, AppError> {
        self.create_with_dice(password, RandomDice::from_os_rng())
    }

    pub fn create_with_dice(&self, password: &str, dice: RandomDice) -> Result<String, AppError> {
        let mut dice = Some(dice);
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_join_code();
            match self.sessions.entry(code.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let dice = dice.take().unwrap_or_else(RandomDice::from_os_rng);
                    let session = GameSession::new(code.clone(), password, self.rules.clone(), dice);
                    slot.insert(Arc::new(Mutex::new(session)));
                    info!(game_id = %code, "Game session created");
                    return Ok(code);
                }
            }
        }
        warn!(attempts = MAX_CODE_ATTEMPTS, "Join code space exhausted");
        Err(AppError::conflict(
            ErrorCode::JoinCodeConflict,
            "Could not allocate a unique game code",
        ))
    }

    pub fn get(&self, code: &str) -> Option<SessionHandle> {
        self.sessions.get(code).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, code: &str) -> bool {
        self.sessions.remove(code).is_some()
    }

    /// Drop sessions idle for at least `ttl` and return their codes.
    pub fn expire_idle(&self, ttl: Duration) -> Vec<String> {
        let stale: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().lock().idle_for() >= ttl)
            .map(|entry| entry.key().clone())
            .collect();

        stale
            .into_iter()
            .filter(|code| {
                self.sessions
                    .remove_if(code, |_, handle| handle.lock().idle_for() >= ttl)
                    .is_some()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Periodically expire idle sessions for the life of the runtime.
pub fn spawn_sweeper(
    registry: Arc<SessionRegistry>,
    every: Duration,
    ttl: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let expired = registry.expire_idle(ttl);
            if !expired.is_empty() {
                info!(
                    expired = expired.len(),
                    remaining = registry.len(),
                    "Expired idle game sessions"
                );
            }
        }
    })
}
