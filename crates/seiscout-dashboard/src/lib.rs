//! seiscout-dashboard - HTTP and WebSocket surface for SeiScout.
//!
//! Serves the entry view, the address-scoped dashboard view, a JSON API over
//! the panel cache and a WebSocket stream of live feed and panel updates.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        seiscout process                          │
//! │                                                                  │
//! │  ┌────────────────┐  ┌───────────────┐  ┌──────────────────┐     │
//! │  │    LiveFeed    │  │  PanelCache   │  │ WalletConnector  │     │
//! │  │    (Arc<>)     │  │ (shared, Arc) │  │     (Arc<>)      │     │
//! │  └───────┬────────┘  └───────┬───────┘  └────────┬─────────┘     │
//! │          │ watch + broadcast │ per (addr, panel) │               │
//! │          ▼                   │                   │               │
//! │  ┌────────────────┐          │                   │               │
//! │  │  broadcaster   │──JSON──┐ │                   │               │
//! │  └────────────────┘        ▼ ▼                   ▼               │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │        axum HTTP Server (port 8080)                        │  │
//! │  │  GET  /                    → entry view                    │  │
//! │  │  GET  /search?addr=        → 204 / 400 / 303 to dashboard  │  │
//! │  │  GET  /dashboard?addr=     → dashboard view or 303 to /    │  │
//! │  │  GET  /api/status          → connection state              │  │
//! │  │  GET  /api/tabs            → tab slugs and labels          │  │
//! │  │  GET  /api/panels/{tab}    → first ready panel snapshot    │  │
//! │  │  POST /api/wallet/*        → wallet connect, copy trade    │  │
//! │  │  GET  /ws?addr=&tab=       → WebSocket stream              │  │
//! │  │  GET  /metrics             → Prometheus text               │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use seiscout_dashboard::{run_server, DashboardConfig, DashboardState};
//!
//! let state = DashboardState::new(feed.clone(), panels.clone(), wallet.clone());
//! let shutdown = CancellationToken::new();
//! run_server(state, DashboardConfig::default(), shutdown.clone()).await?;
//! ```

mod broadcast;
mod config;
mod error;
mod server;
mod state;
mod types;

pub use broadcast::run_broadcaster;
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use server::{create_router, run_server, serve, AppState, ConnectionGuard, ConnectionLimiter};
pub use state::DashboardState;
pub use types::{ClientCommand, DashboardMessage, TabInfo};
