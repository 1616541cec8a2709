//! Simulated live feed for SeiScout.
//!
//! `LiveFeed` is the single shared source of "liveness": a connectivity
//! flag, a rolling latency estimate and the most recent inbound message.
//! It is constructed once at startup and handed to consumers by `Arc`;
//! consumers only ever hold read-only receivers.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start()--> Running --stop()/drop--> Stopped
//! ```
//!
//! While running, two tasks are active:
//! - handshake: flips `connected` to true once, after `handshake_delay_ms`
//! - ticker: every `message_interval_ms` publishes a synthesized message
//!   and a fresh latency estimate
//!
//! Both tasks share one cancellation token, so every timer is released on
//! `stop()`, on drop, and on runtime shutdown.

mod config;
mod error;
mod generator;
mod live;

pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use generator::MessageGenerator;
pub use live::{ConnectionState, Lifecycle, LiveFeed};
