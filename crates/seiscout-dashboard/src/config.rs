//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent WebSocket connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Upper bound on how long `/api/panels/{tab}` waits for a first snapshot.
    #[serde(default = "default_panel_timeout_ms")]
    pub panel_timeout_ms: u64,
    /// Capacity of the fan-out channel shared by all WebSocket clients.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
    /// Allow cross-origin requests to the JSON API.
    #[serde(default)]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> usize {
    32
}

fn default_panel_timeout_ms() -> u64 {
    10_000
}

fn default_broadcast_capacity() -> usize {
    64
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_connections: default_max_connections(),
            panel_timeout_ms: default_panel_timeout_ms(),
            broadcast_capacity: default_broadcast_capacity(),
            cors_permissive: false,
        }
    }
}

impl DashboardConfig {
    pub fn panel_timeout(&self) -> Duration {
        Duration::from_millis(self.panel_timeout_ms)
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
