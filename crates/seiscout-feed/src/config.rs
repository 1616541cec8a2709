//! Feed configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// Live feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Delay before the simulated handshake completes (ms).
    #[serde(default = "default_handshake_delay_ms")]
    pub handshake_delay_ms: u64,
    /// Interval between synthesized messages (ms).
    #[serde(default = "default_message_interval_ms")]
    pub message_interval_ms: u64,
    /// Lower bound of the latency estimate (ms, inclusive).
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,
    /// Upper bound of the latency estimate (ms, exclusive).
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,
    /// Probability that a synthesized message is an alert rather than a pulse.
    #[serde(default = "default_alert_ratio")]
    pub alert_ratio: f64,
    /// Capacity of the per-message broadcast channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// RNG seed. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_handshake_delay_ms() -> u64 {
    1_000
}

fn default_message_interval_ms() -> u64 {
    5_000
}

fn default_latency_min_ms() -> u64 {
    200
}

fn default_latency_max_ms() -> u64 {
    300
}

fn default_alert_ratio() -> f64 {
    0.5
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            handshake_delay_ms: default_handshake_delay_ms(),
            message_interval_ms: default_message_interval_ms(),
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            alert_ratio: default_alert_ratio(),
            channel_capacity: default_channel_capacity(),
            seed: None,
        }
    }
}

impl FeedConfig {
    /// Check invariants the feed relies on.
    pub fn validate(&self) -> FeedResult<()> {
        if self.message_interval_ms == 0 {
            return Err(FeedError::InvalidConfig(
                "message_interval_ms must be > 0".to_string(),
            ));
        }
        if self.latency_min_ms >= self.latency_max_ms {
            return Err(FeedError::InvalidConfig(format!(
                "latency band [{}, {}) is empty",
                self.latency_min_ms, self.latency_max_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.alert_ratio) {
            return Err(FeedError::InvalidConfig(format!(
                "alert_ratio {} outside [0, 1]",
                self.alert_ratio
            )));
        }
        if self.channel_capacity == 0 {
            return Err(FeedError::InvalidConfig(
                "channel_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
