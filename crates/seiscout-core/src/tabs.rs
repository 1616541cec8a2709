//! Dashboard tab container.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a dashboard tab. Each tab hosts exactly one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabId {
    #[default]
    Overview,
    Analysis,
    Behavior,
    Alerts,
    Metrics,
    Network,
    Opportunities,
    Pulse,
}

impl TabId {
    /// Tabs in display order.
    pub const ALL: [TabId; 8] = [
        TabId::Overview,
        TabId::Analysis,
        TabId::Behavior,
        TabId::Alerts,
        TabId::Metrics,
        TabId::Network,
        TabId::Opportunities,
        TabId::Pulse,
    ];

    /// URL slug.
    pub fn slug(self) -> &'static str {
        match self {
            TabId::Overview => "overview",
            TabId::Analysis => "analysis",
            TabId::Behavior => "behavior",
            TabId::Alerts => "alerts",
            TabId::Metrics => "metrics",
            TabId::Network => "network",
            TabId::Opportunities => "opportunities",
            TabId::Pulse => "pulse",
        }
    }

    /// Label shown on the tab strip.
    pub fn label(self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Analysis => "Analysis",
            TabId::Behavior => "Behavior",
            TabId::Alerts => "Alerts",
            TabId::Metrics => "Metrics",
            TabId::Network => "Network",
            TabId::Opportunities => "Alpha",
            TabId::Pulse => "Pulse",
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TabId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| CoreError::UnknownTab(s.to_string()))
    }
}

/// Tracks which of the mutually exclusive tabs is active.
///
/// Selection is a pure state transition; panels own their lifecycles.
#[derive(Debug, Clone, Default)]
pub struct TabContainer {
    active: TabId,
}

impl TabContainer {
    pub fn new(initial: TabId) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> TabId {
        self.active
    }

    /// Activate `id`, returning the previously active tab.
    pub fn select_tab(&mut self, id: TabId) -> TabId {
        std::mem::replace(&mut self.active, id)
    }
}
