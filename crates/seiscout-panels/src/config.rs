//! Panel timing configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};
use crate::kind::PanelKind;

/// Effective timing of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTiming {
    /// Simulated load delay before the first snapshot.
    pub load_delay: Duration,
    /// Refresh interval after the first snapshot. `None` for static panels.
    pub tick: Option<Duration>,
}

impl PanelTiming {
    /// Built-in timing of each panel.
    pub fn default_for(kind: PanelKind) -> Self {
        let (load_ms, tick_ms) = match kind {
            PanelKind::Overview => (1_000, Some(3_000)),
            PanelKind::Analysis => (2_000, None),
            PanelKind::Behavior => (1_200, None),
            PanelKind::Alerts => (1_000, None),
            PanelKind::Metrics => (800, Some(5_000)),
            PanelKind::Network => (1_500, None),
            PanelKind::Opportunities => (1_500, None),
            PanelKind::Pulse => (0, Some(2_000)),
        };
        Self {
            load_delay: Duration::from_millis(load_ms),
            tick: tick_ms.map(Duration::from_millis),
        }
    }
}

/// Per-panel override. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingOverride {
    #[serde(default)]
    pub load_delay_ms: Option<u64>,
    /// `0` disables ticking for this panel.
    #[serde(default)]
    pub tick_ms: Option<u64>,
}

/// Panels configuration (`[panels]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelsConfig {
    /// Multiplier applied to every delay and interval.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// How long an unsubscribed cache entry keeps its poller alive (ms).
    #[serde(default = "default_idle_ttl_ms")]
    pub idle_ttl_ms: u64,
    /// Extra seed mixed into every panel RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-panel timing overrides keyed by panel slug.
    #[serde(default)]
    pub overrides: HashMap<PanelKind, TimingOverride>,
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_idle_ttl_ms() -> u64 {
    30_000
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            idle_ttl_ms: default_idle_ttl_ms(),
            seed: None,
            overrides: HashMap::new(),
        }
    }
}

impl PanelsConfig {
    pub fn validate(&self) -> PanelResult<()> {
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(PanelError::InvalidConfig(format!(
                "time_scale must be a positive number, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }

    /// Effective timing for `kind` after overrides and scaling.
    pub fn timing(&self, kind: PanelKind) -> PanelTiming {
        let base = PanelTiming::default_for(kind);
        let (load_delay, tick) = match self.overrides.get(&kind) {
            Some(o) => (
                o.load_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(base.load_delay),
                match o.tick_ms {
                    Some(0) => None,
                    Some(ms) => Some(Duration::from_millis(ms)),
                    None => base.tick,
                },
            ),
            None => (base.load_delay, base.tick),
        };

        PanelTiming {
            load_delay: self.scale(load_delay),
            // A zero tick would spin; keep at least 1ms.
            tick: tick.map(|t| self.scale(t).max(Duration::from_millis(1))),
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        Duration::from_millis(self.idle_ttl_ms)
    }

    fn scale(&self, d: Duration) -> Duration {
        if self.time_scale == 1.0 {
            d
        } else {
            d.mul_f64(self.time_scale)
        }
    }
}
