//! Panel data for the SeiScout dashboard.
//!
//! - `MetricPoller`: drives one panel for one address (load delay, then
//!   bounded ticks), cancellable at any point
//! - `PanelCache`: shares one poller per `(address, panel)` among all
//!   subscribers and evicts idle entries
//! - `data`: the panel data sets and their tick rules

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod kind;
pub mod poller;
pub mod snapshot;

pub use cache::{PanelCache, PanelSubscription};
pub use config::{PanelTiming, PanelsConfig, TimingOverride};
pub use data::PanelData;
pub use error::{PanelError, PanelResult};
pub use kind::PanelKind;
pub use poller::{panel_seed, MetricPoller, PollerHandle};
pub use snapshot::{PanelSnapshot, PanelState};
