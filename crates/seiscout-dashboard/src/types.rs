//! Wire types for the dashboard WebSocket and JSON API.

use chrono::{DateTime, Utc};
use seiscout_core::{Message, TabId};
use seiscout_feed::ConnectionState;
use seiscout_panels::PanelState;
use seiscout_wallet::{SignedCopyTrade, WalletSession};
use serde::{Deserialize, Serialize};

/// Server-to-client WebSocket message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardMessage {
    /// Connection context changed.
    Status {
        state: ConnectionState,
        at: DateTime<Utc>,
    },
    /// A message arrived on the live feed.
    Feed { message: Message },
    /// Active tab changed.
    Tab { active: TabId, previous: TabId },
    /// New state for the active tab's panel.
    Panel { tab: TabId, state: PanelState },
    /// A client command could not be handled.
    Error { message: String },
}

impl DashboardMessage {
    pub fn status(state: ConnectionState) -> Self {
        DashboardMessage::Status {
            state,
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        DashboardMessage::Error {
            message: message.into(),
        }
    }
}

/// Client-to-server WebSocket command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Switch the active tab.
    SelectTab { tab: TabId },
    /// Forward a payload to the live feed.
    Send { message: serde_json::Value },
}

/// Query string shared by the address-scoped routes.
#[derive(Debug, Default, Deserialize)]
pub struct AddressQuery {
    pub addr: Option<String>,
}

/// Query string of `/ws`.
#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    pub addr: Option<String>,
    pub tab: Option<String>,
}

/// Entry in `/api/tabs`.
#[derive(Debug, Clone, Serialize)]
pub struct TabInfo {
    pub slug: &'static str,
    pub label: &'static str,
}

impl From<TabId> for TabInfo {
    fn from(tab: TabId) -> Self {
        Self {
            slug: tab.slug(),
            label: tab.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletConnectResponse {
    pub ok: bool,
    pub session: WalletSession,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyTradeResponse {
    pub ok: bool,
    pub trade: SignedCopyTrade,
}
