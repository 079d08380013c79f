//! Tunables for quest loading and transitions.

use chrono::TimeDelta;
use std::time::Duration;

/// Configuration shared by the quest repository and transition service.
///
/// # Examples
///
/// ```
/// use questboard::quest::config::QuestBoardConfig;
/// use std::time::Duration;
///
/// let config = QuestBoardConfig::default();
/// assert_eq!(config.synthetic_delay, Duration::from_millis(600));
///
/// let immediate = QuestBoardConfig::immediate();
/// assert!(immediate.synthetic_delay.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestBoardConfig {
    /// Age after which a cached quest collection is refetched on read.
    pub freshness_window: TimeDelta,
    /// Simulated round-trip for transitions of synthetic quests.
    pub synthetic_delay: Duration,
    /// Upper bound for every backend call.
    pub request_timeout: Duration,
}

impl Default for QuestBoardConfig {
    fn default() -> Self {
        Self {
            freshness_window: TimeDelta::minutes(5),
            synthetic_delay: Duration::from_millis(600),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl QuestBoardConfig {
    /// Creates a configuration without the simulated synthetic delay.
    ///
    /// Useful for tests and offline demos.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            synthetic_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Sets the freshness window.
    #[must_use]
    pub const fn with_freshness_window(mut self, window: TimeDelta) -> Self {
        self.freshness_window = window;
        self
    }

    /// Sets the simulated synthetic delay.
    #[must_use]
    pub const fn with_synthetic_delay(mut self, delay: Duration) -> Self {
        self.synthetic_delay = delay;
        self
    }

    /// Sets the backend request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
