//! Prometheus metrics and structured logging for SeiScout.
//!
//! - Prometheus metrics for the live feed, panel pollers, the panel cache,
//!   dashboard clients and wallet connections
//! - Structured logging with tracing (JSON in production)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::{gather_text, Metrics};
