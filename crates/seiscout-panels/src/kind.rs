//! Panel identity.

use seiscout_core::TabId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One data panel of the dashboard. Each tab hosts exactly one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Overview,
    Analysis,
    Behavior,
    Alerts,
    Metrics,
    Network,
    Opportunities,
    Pulse,
}

impl PanelKind {
    pub const ALL: [PanelKind; 8] = [
        PanelKind::Overview,
        PanelKind::Analysis,
        PanelKind::Behavior,
        PanelKind::Alerts,
        PanelKind::Metrics,
        PanelKind::Network,
        PanelKind::Opportunities,
        PanelKind::Pulse,
    ];

    pub fn as_str(self) -> &'static str {
        self.tab().slug()
    }

    /// Tab hosting this panel.
    pub fn tab(self) -> TabId {
        match self {
            PanelKind::Overview => TabId::Overview,
            PanelKind::Analysis => TabId::Analysis,
            PanelKind::Behavior => TabId::Behavior,
            PanelKind::Alerts => TabId::Alerts,
            PanelKind::Metrics => TabId::Metrics,
            PanelKind::Network => TabId::Network,
            PanelKind::Opportunities => TabId::Opportunities,
            PanelKind::Pulse => TabId::Pulse,
        }
    }
}

impl From<TabId> for PanelKind {
    fn from(tab: TabId) -> Self {
        match tab {
            TabId::Overview => PanelKind::Overview,
            TabId::Analysis => PanelKind::Analysis,
            TabId::Behavior => PanelKind::Behavior,
            TabId::Alerts => PanelKind::Alerts,
            TabId::Metrics => PanelKind::Metrics,
            TabId::Network => PanelKind::Network,
            TabId::Opportunities => PanelKind::Opportunities,
            TabId::Pulse => PanelKind::Pulse,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
