//! Engine timing and sizing configuration.
//!
//! Environment variables must be set by the runtime environment; every knob
//! falls back to a sensible default when unset or unparseable.

use std::time::Duration;

/// Timing knobs for the engine loop.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Grace period a disconnected player gets before permanent bot-conversion.
    pub reconnect_grace: Duration,
    /// Pacing delay before a bot auto-play fires, so clients can observe turns.
    pub bot_delay: Duration,
    /// Delay between the game-over announcement and the final log broadcast.
    pub teardown_log_delay: Duration,
    /// Delay between the final log broadcast and reverting to lobby state.
    pub teardown_lobby_delay: Duration,
    /// Maximum number of retained in-game log entries.
    pub log_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reconnect_grace: Duration::from_secs(60),
            bot_delay: Duration::from_millis(900),
            teardown_log_delay: Duration::from_secs(2),
            teardown_lobby_delay: Duration::from_secs(2),
            log_cap: 200,
        }
    }
}

impl EngineConfig {
    /// Build a config from `SEVENS_*` environment variables, defaulting any
    /// missing or malformed value.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reconnect_grace: env_secs("SEVENS_GRACE_SECS", defaults.reconnect_grace),
            bot_delay: env_millis("SEVENS_BOT_DELAY_MS", defaults.bot_delay),
            teardown_log_delay: env_secs("SEVENS_TEARDOWN_LOG_SECS", defaults.teardown_log_delay),
            teardown_lobby_delay: env_secs(
                "SEVENS_TEARDOWN_LOBBY_SECS",
                defaults.teardown_lobby_delay,
            ),
            log_cap: std::env::var("SEVENS_LOG_CAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_cap),
        }
    }
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_positive() {
        let cfg = EngineConfig::default();
        assert!(cfg.reconnect_grace > Duration::ZERO);
        assert!(cfg.bot_delay > Duration::ZERO);
        assert!(cfg.teardown_log_delay > Duration::ZERO);
        assert!(cfg.teardown_lobby_delay > Duration::ZERO);
        assert!(cfg.log_cap > 0);
    }
}
