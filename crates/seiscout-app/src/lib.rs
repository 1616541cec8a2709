//! SeiScout dashboard service.
//!
//! Wires the long-lived services together and runs them:
//! - `LiveFeed`: simulated connection context
//! - `PanelCache`: per-(address, panel) pollers shared by all clients
//! - `WalletConnector`: wallet extension seam, demo mode only when asked
//! - the axum dashboard server

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, ConfigSource};
pub use error::{AppError, AppResult};
