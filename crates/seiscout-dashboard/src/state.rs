//! Services shared by every dashboard handler.

use std::sync::Arc;

use seiscout_core::TabId;
use seiscout_feed::{ConnectionState, LiveFeed};
use seiscout_panels::PanelCache;
use seiscout_wallet::WalletConnector;

use crate::types::TabInfo;

/// Handles to the long-lived services. Cheap to clone.
#[derive(Clone)]
pub struct DashboardState {
    feed: Arc<LiveFeed>,
    panels: PanelCache,
    wallet: Arc<WalletConnector>,
}

impl DashboardState {
    pub fn new(feed: Arc<LiveFeed>, panels: PanelCache, wallet: Arc<WalletConnector>) -> Self {
        Self {
            feed,
            panels,
            wallet,
        }
    }

    pub fn feed(&self) -> &Arc<LiveFeed> {
        &self.feed
    }

    pub fn panels(&self) -> &PanelCache {
        &self.panels
    }

    pub fn wallet(&self) -> &Arc<WalletConnector> {
        &self.wallet
    }

    /// Current connection context.
    pub fn status(&self) -> ConnectionState {
        self.feed.snapshot()
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> Vec<TabInfo> {
        TabId::ALL.into_iter().map(TabInfo::from).collect()
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("feed", &self.feed)
            .field("cached_panels", &self.panels.len())
            .field("wallet", &self.wallet)
            .finish()
    }
}
