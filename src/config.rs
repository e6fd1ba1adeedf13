//! Process configuration parsed from environment variables.

use std::time::Duration;

use crate::llm::demo::DEFAULT_DEMO_DELAY;
use crate::services::agents::{DEFAULT_AUTORUN_DELAY, DEFAULT_THINKING_DELAY};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Cosmetic delays. Tests zero them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub thinking: Duration,
    pub autorun: Duration,
    pub demo: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self { thinking: DEFAULT_THINKING_DELAY, autorun: DEFAULT_AUTORUN_DELAY, demo: DEFAULT_DEMO_DELAY }
    }
}

impl Timings {
    #[must_use]
    pub fn zero() -> Self {
        Self { thinking: Duration::ZERO, autorun: Duration::ZERO, demo: Duration::ZERO }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub timings: Timings,
    pub max_sessions: usize,
}

impl AppConfig {
    /// Read configuration; malformed values fall back to defaults.
    ///
    /// - `PORT`: default 3000
    /// - `AGENT_THINKING_DELAY_MS`: default 1200
    /// - `AGENT_AUTORUN_DELAY_MS`: default 1500
    /// - `DEMO_RESPONSE_DELAY_MS`: default 2000
    /// - `MAX_SESSIONS`: default 1000, must be positive
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Timings::default();
        let millis = |key: &str, default: Duration| {
            var(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map_or(default, Duration::from_millis)
        };
        Self {
            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            timings: Timings {
                thinking: millis("AGENT_THINKING_DELAY_MS", defaults.thinking),
                autorun: millis("AGENT_AUTORUN_DELAY_MS", defaults.autorun),
                demo: millis("DEMO_RESPONSE_DELAY_MS", defaults.demo),
            },
            max_sessions: var("MAX_SESSIONS")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_SESSIONS),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
