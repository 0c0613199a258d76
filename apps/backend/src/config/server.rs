//! Process configuration read once from the environment at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::rules::{GameRules, DEFAULT_MAX_PLAYERS};
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5004;
const DEFAULT_IDLE_TTL_SECS: u64 = 4 * 60 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Validated origins; empty means the localhost fallback applies.
    pub cors_allowed_origins: Vec<String>,
    /// Sessions untouched for this long are dropped by the sweeper.
    pub session_idle_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub max_players: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: Vec::new(),
            session_idle_ttl: Duration::from_secs(DEFAULT_IDLE_TTL_SECS),
            session_sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("BACKEND_PORT", &lookup, defaults.port)?;
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();
        let idle_ttl = parse_or("SESSION_IDLE_TTL_SECS", &lookup, DEFAULT_IDLE_TTL_SECS)?;
        let sweep = parse_or(
            "SESSION_SWEEP_INTERVAL_SECS",
            &lookup,
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?;
        if sweep == 0 {
            return Err(AppError::config(
                "SESSION_SWEEP_INTERVAL_SECS must be greater than zero",
            ));
        }
        let max_players = parse_or("MAX_PLAYERS", &lookup, defaults.max_players)?;
        if max_players == 0 {
            return Err(AppError::config("MAX_PLAYERS must be greater than zero"));
        }

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            session_idle_ttl: Duration::from_secs(idle_ttl),
            session_sweep_interval: Duration::from_secs(sweep),
            max_players,
        })
    }

    /// Admission rules every new session starts with.
    pub fn game_rules(&self) -> GameRules {
        GameRules::default().with_max_players(self.max_players)
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{key} is invalid ('{raw}'): {e}"))),
    }
}

/// Comma-separated origins; blanks, `null` and non-http(s) entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect()
}
