//! Prometheus metrics for SeiScout.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration failure
//! means duplicate metric names, a startup-time programming error that
//! should crash immediately. These panics only happen during static
//! initialization, never at runtime.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_histogram, register_int_gauge,
    register_int_gauge_vec, CounterVec, Encoder, Gauge, Histogram, IntGauge, IntGaugeVec,
    TextEncoder,
};

/// Live feed connection state (1 = connected, 0 = not yet connected).
pub static FEED_CONNECTED: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "seiscout_feed_connected",
        "Live feed connection state (1=connected)"
    )
    .unwrap()
});

/// Feed messages published.
/// Labels: kind (alert/pulse)
pub static FEED_MESSAGES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "seiscout_feed_messages_total",
        "Total messages published by the live feed",
        &["kind"]
    )
    .unwrap()
});

/// Estimated feed latency in milliseconds.
pub static FEED_LATENCY_MS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "seiscout_feed_latency_ms",
        "Estimated feed latency in milliseconds",
        vec![50.0, 100.0, 200.0, 250.0, 300.0, 400.0, 500.0, 1000.0]
    )
    .unwrap()
});

/// Outbound messages accepted by the feed stub.
pub static FEED_OUTBOUND_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "seiscout_feed_outbound_total",
        "Outbound messages accepted by the feed",
        &["result"]
    )
    .unwrap()
});

/// Panel lifecycle events.
/// Labels: panel, event (load/tick/cancel)
pub static PANEL_EVENTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "seiscout_panel_events_total",
        "Panel poller lifecycle events",
        &["panel", "event"]
    )
    .unwrap()
});

/// Running pollers per panel.
pub static PANEL_ACTIVE_POLLERS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "seiscout_panel_active_pollers",
        "Running panel pollers",
        &["panel"]
    )
    .unwrap()
});

/// Panel cache lookups.
/// Labels: result (hit/miss)
pub static PANEL_CACHE_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "seiscout_panel_cache_total",
        "Panel cache lookups",
        &["result"]
    )
    .unwrap()
});

/// Connected dashboard WebSocket clients.
pub static DASHBOARD_CLIENTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "seiscout_dashboard_clients",
        "Connected dashboard WebSocket clients"
    )
    .unwrap()
});

/// Wallet connection attempts.
/// Labels: outcome (connected/demo/error)
pub static WALLET_CONNECT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "seiscout_wallet_connect_total",
        "Wallet connection attempts by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record feed connected.
    pub fn feed_connected() {
        FEED_CONNECTED.set(1.0);
    }

    /// Record a published feed message and its latency estimate.
    pub fn feed_message(kind: &str, latency_ms: f64) {
        FEED_MESSAGES_TOTAL.with_label_values(&[kind]).inc();
        FEED_LATENCY_MS.observe(latency_ms);
    }

    /// Record an outbound message handed to the feed.
    pub fn feed_outbound(result: &str) {
        FEED_OUTBOUND_TOTAL.with_label_values(&[result]).inc();
    }

    /// Record a panel's initial load.
    pub fn panel_loaded(panel: &str) {
        PANEL_EVENTS_TOTAL.with_label_values(&[panel, "load"]).inc();
    }

    /// Record a panel tick.
    pub fn panel_ticked(panel: &str) {
        PANEL_EVENTS_TOTAL.with_label_values(&[panel, "tick"]).inc();
    }

    /// Record a cancelled poller.
    pub fn panel_cancelled(panel: &str) {
        PANEL_EVENTS_TOTAL.with_label_values(&[panel, "cancel"]).inc();
    }

    /// Poller started.
    pub fn poller_started(panel: &str) {
        PANEL_ACTIVE_POLLERS.with_label_values(&[panel]).inc();
    }

    /// Poller finished (cancelled or stopped).
    pub fn poller_finished(panel: &str) {
        PANEL_ACTIVE_POLLERS.with_label_values(&[panel]).dec();
    }

    /// Record a cache lookup.
    pub fn panel_cache(hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        PANEL_CACHE_TOTAL.with_label_values(&[result]).inc();
    }

    /// Dashboard client connected.
    pub fn client_connected() {
        DASHBOARD_CLIENTS.inc();
    }

    /// Dashboard client disconnected.
    pub fn client_disconnected() {
        DASHBOARD_CLIENTS.dec();
    }

    /// Record a wallet connection outcome.
    pub fn wallet_connect(outcome: &str) {
        WALLET_CONNECT_TOTAL.with_label_values(&[outcome]).inc();
    }
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather_text() -> TelemetryResult<String> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buf = Vec::new();
    encoder
        .encode(&families, &mut buf)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| TelemetryError::Metrics(e.to_string()))
}
