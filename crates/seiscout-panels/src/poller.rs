//! Metric poller.
//!
//! One poller drives one panel for one address: a one-shot load delay, then
//! (for live panels) a fixed-interval tick that derives each snapshot from
//! the one before it. Every run owns a cancellation token; changing the
//! address or dropping the handle cancels it, and a cancelled run can no
//! longer publish.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seiscout_core::Address;
use seiscout_telemetry::Metrics;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::PanelTiming;
use crate::kind::PanelKind;
use crate::snapshot::{PanelSnapshot, PanelState};

/// RNG seed for one panel of one address.
///
/// Stable within a process, so re-opening a panel for the same wallet shows
/// the same baseline.
pub fn panel_seed(address: &Address, kind: PanelKind, extra: Option<u64>) -> u64 {
    let mut hasher = DefaultHasher::new();
    address.hash(&mut hasher);
    kind.hash(&mut hasher);
    extra.hash(&mut hasher);
    hasher.finish()
}

/// Spawns panel pollers.
pub struct MetricPoller;

impl MetricPoller {
    /// Start polling `kind` for `address`.
    ///
    /// With no address the poller stays `Idle` and schedules nothing.
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        kind: PanelKind,
        address: Option<Address>,
        timing: PanelTiming,
        seed: Option<u64>,
    ) -> PollerHandle {
        let (state_tx, _) = watch::channel(PanelState::Idle);
        let handle = PollerHandle {
            kind,
            timing,
            seed,
            state_tx: Arc::new(state_tx),
            run: Mutex::new(None),
        };
        handle.set_address(address);
        handle
    }
}

struct Run {
    address: Address,
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Owner of a running poller. Dropping it cancels the poller.
pub struct PollerHandle {
    kind: PanelKind,
    timing: PanelTiming,
    seed: Option<u64>,
    state_tx: Arc<watch::Sender<PanelState>>,
    run: Mutex<Option<Run>>,
}

impl PollerHandle {
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn address(&self) -> Option<Address> {
        self.run.lock().as_ref().map(|r| r.address.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> PanelState {
        self.state_tx.borrow().clone()
    }

    /// Whether a run is scheduled and not yet finished.
    pub fn is_active(&self) -> bool {
        self.run
            .lock()
            .as_ref()
            .is_some_and(|r| !r.token.is_cancelled() && !r.task.is_finished())
    }

    /// Point the poller at a different address.
    ///
    /// Cancels any pending load or tick of the previous address before the
    /// new run is scheduled, so no stale snapshot is published afterwards.
    pub fn set_address(&self, address: Option<Address>) {
        let mut run = self.run.lock();
        if let Some(previous) = run.take() {
            previous.token.cancel();
            debug!(panel = %self.kind, address = %previous.address, "Cancelled panel poller");
        }

        let Some(address) = address else {
            self.state_tx.send_replace(PanelState::Idle);
            return;
        };

        self.state_tx.send_replace(PanelState::Loading);
        let token = CancellationToken::new();
        let task = tokio::spawn(run_poller(
            self.kind,
            address.clone(),
            self.timing,
            self.seed,
            self.state_tx.clone(),
            token.clone(),
        ));
        *run = Some(Run {
            address,
            token,
            task,
        });
    }

    /// Cancel the current run. The last published state is kept.
    pub fn stop(&self) {
        if let Some(run) = self.run.lock().take() {
            run.token.cancel();
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(run) = self.run.get_mut().take() {
            run.token.cancel();
        }
    }
}

/// Keeps the active-poller gauge accurate on every exit path.
struct ActiveGuard(PanelKind);

impl ActiveGuard {
    fn new(kind: PanelKind) -> Self {
        Metrics::poller_started(kind.as_str());
        Self(kind)
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        Metrics::poller_finished(self.0.as_str());
    }
}

/// Publish unless the run was cancelled.
///
/// The check happens under the channel's write lock, and cancellation always
/// precedes the replacement write in `set_address`, so a cancelled run can
/// never overwrite a newer state.
fn publish(
    state_tx: &watch::Sender<PanelState>,
    token: &CancellationToken,
    state: PanelState,
) -> bool {
    state_tx.send_if_modified(|current| {
        if token.is_cancelled() {
            false
        } else {
            *current = state;
            true
        }
    })
}

async fn run_poller(
    kind: PanelKind,
    address: Address,
    timing: PanelTiming,
    seed: Option<u64>,
    state_tx: Arc<watch::Sender<PanelState>>,
    token: CancellationToken,
) {
    let _active = ActiveGuard::new(kind);
    let mut rng = StdRng::seed_from_u64(panel_seed(&address, kind, seed));

    tokio::select! {
        _ = token.cancelled() => {
            Metrics::panel_cancelled(kind.as_str());
            debug!(panel = %kind, %address, "Panel load cancelled");
            return;
        }
        _ = sleep(timing.load_delay) => {}
    }

    let mut snapshot = PanelSnapshot::initial(kind, address, &mut rng);
    if !publish(&state_tx, &token, PanelState::Ready(snapshot.clone())) {
        return;
    }
    Metrics::panel_loaded(kind.as_str());
    debug!(panel = %kind, address = %snapshot.address, "Panel loaded");

    let Some(period) = timing.tick else {
        return;
    };

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                Metrics::panel_cancelled(kind.as_str());
                debug!(panel = %kind, "Panel ticker cancelled");
                break;
            }
            _ = interval.tick() => {
                snapshot = snapshot.next(&mut rng);
                if !publish(&state_tx, &token, PanelState::Ready(snapshot.clone())) {
                    break;
                }
                Metrics::panel_ticked(kind.as_str());
                trace!(panel = %kind, revision = snapshot.revision, "Panel ticked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelsConfig;
    use crate::data::PanelData;
    use std::time::Duration;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    fn timing(kind: PanelKind) -> PanelTiming {
        PanelsConfig::default().timing(kind)
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_address_never_loads() {
        for kind in PanelKind::ALL {
            let handle = MetricPoller::spawn(kind, None, timing(kind), Some(1));
            assert_eq!(handle.state(), PanelState::Idle);
            assert!(!handle.is_active());

            sleep(Duration::from_secs(60)).await;
            assert_eq!(handle.state(), PanelState::Idle);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loads_after_fixed_delay() {
        let handle = MetricPoller::spawn(
            PanelKind::Analysis,
            Some(addr("sei1demoaddress")),
            timing(PanelKind::Analysis),
            None,
        );
        assert_eq!(handle.state(), PanelState::Loading);

        sleep(Duration::from_millis(1_999)).await;
        assert_eq!(handle.state(), PanelState::Loading);

        sleep(Duration::from_millis(2)).await;
        let state = handle.state();
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.address.as_str(), "sei1demoaddress");
        assert!(matches!(snapshot.data, PanelData::Analysis(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_panel_loads_at_its_own_delay() {
        for kind in PanelKind::ALL {
            let delay = timing(kind).load_delay;
            let handle =
                MetricPoller::spawn(kind, Some(addr("sei1demoaddress")), timing(kind), Some(3));
            assert_eq!(handle.state(), PanelState::Loading, "{kind}");

            if !delay.is_zero() {
                sleep(delay - Duration::from_millis(1)).await;
                assert_eq!(handle.state(), PanelState::Loading, "{kind}");
                sleep(Duration::from_millis(2)).await;
            } else {
                sleep(Duration::from_millis(1)).await;
            }

            let state = handle.state();
            let snapshot = state.snapshot().unwrap();
            assert_eq!(snapshot.revision, 0, "{kind}");
            assert_eq!(snapshot.address.as_str(), "sei1demoaddress");
            assert_eq!(snapshot.data.kind(), kind);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_derive_from_previous_snapshot() {
        let handle = MetricPoller::spawn(
            PanelKind::Metrics,
            Some(addr("addr1")),
            timing(PanelKind::Metrics),
            Some(5),
        );
        let mut rx = handle.subscribe();

        sleep(Duration::from_millis(801)).await;
        assert_eq!(handle.state().snapshot().map(|s| s.revision), Some(0));

        let mut revisions = Vec::new();
        for _ in 0..5 {
            rx.changed().await.unwrap();
            if let Some(s) = rx.borrow_and_update().snapshot() {
                revisions.push(s.revision);
            }
        }
        // First `changed` may observe the initial load.
        assert!(revisions.windows(2).all(|w| w[1] == w[0] + 1));
        assert!(*revisions.last().unwrap() >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_static_panel_does_not_tick() {
        let handle = MetricPoller::spawn(
            PanelKind::Behavior,
            Some(addr("addr1")),
            timing(PanelKind::Behavior),
            None,
        );
        sleep(Duration::from_millis(1_201)).await;
        let loaded = handle.state();
        assert!(loaded.is_ready());

        sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.state(), loaded);
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_mid_load_publishes_nothing() {
        let handle = MetricPoller::spawn(
            PanelKind::Overview,
            Some(addr("addr1")),
            timing(PanelKind::Overview),
            None,
        );
        let rx = handle.subscribe();
        sleep(Duration::from_millis(500)).await;
        drop(handle);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(*rx.borrow(), PanelState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_last_state() {
        let handle = MetricPoller::spawn(
            PanelKind::Pulse,
            Some(addr("addr1")),
            timing(PanelKind::Pulse),
            None,
        );
        sleep(Duration::from_millis(2_001)).await;
        handle.stop();
        let frozen = handle.state();
        assert_eq!(frozen.snapshot().map(|s| s.revision), Some(1));

        sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.state(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_address_change_mid_load_discards_old() {
        let handle = MetricPoller::spawn(
            PanelKind::Network,
            Some(addr("addr1")),
            timing(PanelKind::Network),
            None,
        );
        let mut rx = handle.subscribe();

        sleep(Duration::from_millis(1_000)).await;
        handle.set_address(Some(addr("addr2")));
        assert_eq!(handle.state(), PanelState::Loading);
        rx.borrow_and_update();

        // The first run would have completed at 1500ms.
        sleep(Duration::from_millis(1_000)).await;
        assert_eq!(handle.state(), PanelState::Loading);

        sleep(Duration::from_millis(501)).await;
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.snapshot().map(|s| s.address.as_str()), Some("addr2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_address_returns_to_idle() {
        let handle = MetricPoller::spawn(
            PanelKind::Pulse,
            Some(addr("addr1")),
            timing(PanelKind::Pulse),
            None,
        );
        sleep(Duration::from_millis(10)).await;
        assert!(handle.state().is_ready());

        handle.set_address(None);
        assert_eq!(handle.state(), PanelState::Idle);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(handle.state(), PanelState::Idle);
        assert_eq!(handle.address(), None);
    }

    #[test]
    fn test_panel_seed_stable_per_address() {
        let a = addr("addr1");
        let b = addr("addr2");
        assert_eq!(
            panel_seed(&a, PanelKind::Overview, None),
            panel_seed(&a, PanelKind::Overview, None)
        );
        assert_ne!(
            panel_seed(&a, PanelKind::Overview, None),
            panel_seed(&b, PanelKind::Overview, None)
        );
        assert_ne!(
            panel_seed(&a, PanelKind::Overview, None),
            panel_seed(&a, PanelKind::Overview, Some(1))
        );
    }
}
