//! The live feed service.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use seiscout_core::Message;
use seiscout_telemetry::Metrics;
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::generator::MessageGenerator;

/// State shared with every subscriber.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionState {
    /// Whether the simulated handshake has completed.
    pub connected: bool,
    /// Latest latency estimate in milliseconds (0 until the first message).
    pub latency_ms: u64,
    /// Most recent message, if any.
    pub last_message: Option<Message>,
}

/// Feed lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// Simulated live feed.
///
/// Only the feed's own tasks write to the shared state; everyone else reads
/// through `subscribe()`, `snapshot()` or `messages()`.
pub struct LiveFeed {
    config: FeedConfig,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    message_tx: broadcast::Sender<Message>,
    lifecycle: Mutex<Lifecycle>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    shutdown_token: CancellationToken,
}

impl LiveFeed {
    /// Create an idle feed. No timers run until `start()`.
    pub fn new(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;
        let (state_tx, _) = watch::channel(ConnectionState::default());
        let (message_tx, _) = broadcast::channel(config.channel_capacity);
        Ok(Self {
            config,
            state_tx: Arc::new(state_tx),
            message_tx,
            lifecycle: Mutex::new(Lifecycle::Idle),
            tasks: Mutex::new(Vec::new()),
            shutdown_token: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.lock()
    }

    /// Start the handshake and ticker tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> FeedResult<()> {
        {
            let mut lifecycle = self.lifecycle.lock();
            match *lifecycle {
                Lifecycle::Idle => *lifecycle = Lifecycle::Running,
                Lifecycle::Running => return Err(FeedError::AlreadyStarted),
                Lifecycle::Stopped => return Err(FeedError::Stopped),
            }
        }

        info!(
            handshake_delay_ms = self.config.handshake_delay_ms,
            message_interval_ms = self.config.message_interval_ms,
            "Starting live feed"
        );

        let handshake = tokio::spawn(run_handshake(
            self.state_tx.clone(),
            Duration::from_millis(self.config.handshake_delay_ms),
            self.shutdown_token.clone(),
        ));
        let ticker = tokio::spawn(run_ticker(
            self.state_tx.clone(),
            self.message_tx.clone(),
            MessageGenerator::new(&self.config),
            Duration::from_millis(self.config.message_interval_ms),
            self.shutdown_token.clone(),
        ));

        self.tasks.lock().extend([handshake, ticker]);
        Ok(())
    }

    /// Stop all timers and wait for the tasks to exit.
    ///
    /// Idempotent. Nothing is published after this returns.
    pub async fn stop(&self) {
        *self.lifecycle.lock() = Lifecycle::Stopped;
        self.shutdown_token.cancel();

        let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            let _ = task.await;
        }
        info!("Live feed stopped");
    }

    /// Subscribe to connection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Current connection state.
    pub fn snapshot(&self) -> ConnectionState {
        self.state_tx.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state_tx.borrow().connected
    }

    /// Receive every published message (not just the latest).
    pub fn messages(&self) -> broadcast::Receiver<Message> {
        self.message_tx.subscribe()
    }

    /// Accept an outbound message.
    ///
    /// There is no transport behind the feed: the message is logged and
    /// dropped.
    pub fn send(&self, message: serde_json::Value) -> FeedResult<()> {
        info!(%message, "Outbound message accepted (no transport attached)");
        Metrics::feed_outbound("accepted");
        Ok(())
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}

impl std::fmt::Debug for LiveFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFeed")
            .field("lifecycle", &self.lifecycle())
            .field("connected", &self.is_connected())
            .finish()
    }
}

async fn run_handshake(
    state_tx: Arc<watch::Sender<ConnectionState>>,
    delay: Duration,
    token: CancellationToken,
) {
    tokio::select! {
        _ = token.cancelled() => {
            debug!("Handshake cancelled before completion");
        }
        _ = tokio::time::sleep(delay) => {
            let flipped = state_tx.send_if_modified(|state| {
                if state.connected {
                    false
                } else {
                    state.connected = true;
                    true
                }
            });
            if flipped {
                Metrics::feed_connected();
                info!("Live feed connected");
            }
        }
    }
}

async fn run_ticker(
    state_tx: Arc<watch::Sender<ConnectionState>>,
    message_tx: broadcast::Sender<Message>,
    mut generator: MessageGenerator,
    period: Duration,
    token: CancellationToken,
) {
    // First message one full period after start.
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Feed ticker cancelled");
                break;
            }
            _ = interval.tick() => {
                let (message, latency_ms) = generator.next_message();
                Metrics::feed_message(message.kind.as_str(), latency_ms as f64);
                trace!(kind = message.kind.as_str(), latency_ms, "Publishing feed message");

                state_tx.send_modify(|state| {
                    state.latency_ms = latency_ms;
                    state.last_message = Some(message.clone());
                });
                // No receivers is normal when no client is connected.
                let _ = message_tx.send(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;
    use tokio_test::{assert_err, assert_ok};

    fn fast_config() -> FeedConfig {
        FeedConfig {
            handshake_delay_ms: 1_000,
            message_interval_ms: 5_000,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_connects_after_handshake_delay() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        assert_ok!(feed.start());
        assert!(!feed.is_connected());

        sleep(Duration::from_millis(999)).await;
        assert!(!feed.is_connected());

        sleep(Duration::from_millis(2)).await;
        assert!(feed.is_connected());

        feed.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_connected_flips_exactly_once() {
        let feed = LiveFeed::new(FeedConfig {
            message_interval_ms: 500,
            ..fast_config()
        })
        .unwrap();
        let mut rx = feed.subscribe();
        feed.start().unwrap();

        let mut transitions = 0;
        let mut last = false;
        let deadline = Instant::now() + Duration::from_secs(30);
        while Instant::now() < deadline {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let connected = rx.borrow_and_update().connected;
                    if connected != last {
                        transitions += 1;
                        assert!(connected, "connected must never revert to false");
                        last = connected;
                    }
                }
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }

        assert_eq!(transitions, 1);
        feed.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_messages_on_interval() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        let mut messages = feed.messages();
        feed.start().unwrap();

        sleep(Duration::from_millis(4_999)).await;
        assert!(messages.try_recv().is_err());
        assert!(feed.snapshot().last_message.is_none());

        sleep(Duration::from_millis(2)).await;
        let first = messages.try_recv().unwrap();
        let state = feed.snapshot();
        assert_eq!(state.last_message.as_ref().map(|m| m.id), Some(first.id));
        assert!((200..300).contains(&state.latency_ms));

        sleep(Duration::from_millis(5_000)).await;
        let second = messages.try_recv().unwrap();
        assert_ne!(first.id, second.id);

        feed.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_timers() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        let mut messages = feed.messages();
        feed.start().unwrap();

        sleep(Duration::from_millis(500)).await;
        feed.stop().await;
        assert_eq!(feed.lifecycle(), Lifecycle::Stopped);

        sleep(Duration::from_secs(60)).await;
        assert!(!feed.is_connected());
        assert!(messages.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timers() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        let rx = feed.subscribe();
        feed.start().unwrap();
        drop(feed);

        sleep(Duration::from_secs(10)).await;
        assert!(!rx.borrow().connected);
        assert!(rx.borrow().last_message.is_none());
    }

    #[tokio::test]
    async fn test_start_twice_rejected() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        assert_ok!(feed.start());
        assert_eq!(assert_err!(feed.start()), FeedError::AlreadyStarted);

        feed.stop().await;
        assert_eq!(feed.start(), Err(FeedError::Stopped));
    }

    #[tokio::test]
    async fn test_send_is_accepted_stub() {
        let feed = LiveFeed::new(fast_config()).unwrap();
        let result = feed.send(serde_json::json!({"type": "ping"}));
        assert!(result.is_ok());
        assert!(feed.snapshot().last_message.is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = LiveFeed::new(FeedConfig {
            latency_min_ms: 500,
            latency_max_ms: 100,
            ..Default::default()
        });
        assert!(matches!(result, Err(FeedError::InvalidConfig(_))));
    }
}
