//! Shared panel cache.
//!
//! At most one poller runs per `(address, panel)` key. Every subscriber of a
//! key shares that poller's `watch` channel. When the last subscriber goes
//! away the entry stays warm for `idle_ttl` and is then evicted, which drops
//! (and thereby cancels) its poller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use seiscout_core::Address;
use seiscout_telemetry::Metrics;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::PanelsConfig;
use crate::error::{PanelError, PanelResult};
use crate::kind::PanelKind;
use crate::poller::{MetricPoller, PollerHandle};
use crate::snapshot::{PanelSnapshot, PanelState};

type CacheKey = (Address, PanelKind);

struct CacheEntry {
    id: u64,
    poller: PollerHandle,
    subscribers: usize,
    /// Pending eviction, armed while `subscribers == 0`.
    eviction: Option<CancellationToken>,
}

impl Drop for CacheEntry {
    fn drop(&mut self) {
        if let Some(token) = self.eviction.take() {
            token.cancel();
        }
    }
}

struct CacheInner {
    config: PanelsConfig,
    entries: DashMap<CacheKey, CacheEntry>,
    next_id: AtomicU64,
}

/// Panel cache keyed by address and panel kind.
#[derive(Clone)]
pub struct PanelCache {
    inner: Arc<CacheInner>,
}

impl PanelCache {
    pub fn new(config: PanelsConfig) -> PanelResult<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(CacheInner {
                config,
                entries: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        })
    }

    pub fn config(&self) -> &PanelsConfig {
        &self.inner.config
    }

    /// Subscribe to a panel, starting its poller on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self, address: &Address, kind: PanelKind) -> PanelSubscription {
        let key = (address.clone(), kind);
        let (id, rx) = match self.inner.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.subscribers += 1;
                if let Some(token) = entry.eviction.take() {
                    token.cancel();
                }
                Metrics::panel_cache(true);
                (entry.id, entry.poller.subscribe())
            }
            Entry::Vacant(vacant) => {
                let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                let poller = MetricPoller::spawn(
                    kind,
                    Some(address.clone()),
                    self.inner.config.timing(kind),
                    self.inner.config.seed,
                );
                let rx = poller.subscribe();
                vacant.insert(CacheEntry {
                    id,
                    poller,
                    subscribers: 1,
                    eviction: None,
                });
                Metrics::panel_cache(false);
                debug!(panel = %kind, %address, "Started shared panel poller");
                (id, rx)
            }
        };

        PanelSubscription {
            kind,
            address: address.clone(),
            entry_id: id,
            rx,
            cache: Arc::downgrade(&self.inner),
        }
    }

    /// Drop every entry for `address`, cancelling its pollers.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, address: &Address) -> usize {
        let before = self.inner.entries.len();
        self.inner.entries.retain(|(a, _), _| a != address);
        let removed = before.saturating_sub(self.inner.entries.len());
        if removed > 0 {
            info!(%address, removed, "Invalidated panel cache entries");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    /// Number of cached entries, warm or subscribed.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Number of pollers still loading or ticking.
    pub fn in_flight(&self) -> usize {
        self.inner
            .entries
            .iter()
            .filter(|e| e.poller.is_active())
            .count()
    }

    /// Subscriber count of one key, if cached.
    pub fn subscribers(&self, address: &Address, kind: PanelKind) -> Option<usize> {
        self.inner
            .entries
            .get(&(address.clone(), kind))
            .map(|e| e.subscribers)
    }
}

impl CacheInner {
    fn release(self: &Arc<Self>, key: &CacheKey, entry_id: u64) {
        let arm = {
            let Some(mut entry) = self.entries.get_mut(key) else {
                return;
            };
            // The entry was invalidated and recreated since we subscribed.
            if entry.id != entry_id {
                return;
            }
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers > 0 {
                return;
            }
            let ttl = self.config.idle_ttl();
            match tokio::runtime::Handle::try_current() {
                Ok(runtime) if !ttl.is_zero() => {
                    let token = CancellationToken::new();
                    entry.eviction = Some(token.clone());
                    Some((runtime, token, ttl))
                }
                _ => None,
            }
        };

        match arm {
            Some((runtime, token, ttl)) => {
                let cache = Arc::downgrade(self);
                let key = key.clone();
                runtime.spawn(evict_after(cache, key, entry_id, token, ttl));
            }
            None => self.evict(key, entry_id),
        }
    }

    fn evict(&self, key: &CacheKey, entry_id: u64) {
        let removed = self
            .entries
            .remove_if(key, |_, e| e.id == entry_id && e.subscribers == 0);
        if removed.is_some() {
            debug!(panel = %key.1, address = %key.0, "Evicted idle panel poller");
        }
    }
}

async fn evict_after(
    cache: Weak<CacheInner>,
    key: CacheKey,
    entry_id: u64,
    token: CancellationToken,
    ttl: Duration,
) {
    tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(ttl) => {
            if let Some(cache) = cache.upgrade() {
                cache.evict(&key, entry_id);
            }
        }
    }
}

/// A live view of one cached panel. Dropping it releases the entry.
pub struct PanelSubscription {
    kind: PanelKind,
    address: Address,
    entry_id: u64,
    rx: watch::Receiver<PanelState>,
    cache: Weak<CacheInner>,
}

impl PanelSubscription {
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Current state, marking it as seen.
    pub fn current(&mut self) -> PanelState {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next state change.
    ///
    /// Returns `None` once the poller has been evicted or invalidated.
    pub async fn next_state(&mut self) -> Option<PanelState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait for the first `Ready` snapshot.
    pub async fn wait_ready(&mut self, timeout: Duration) -> PanelResult<PanelSnapshot> {
        let ready = tokio::time::timeout(timeout, self.rx.wait_for(PanelState::is_ready)).await;
        match ready {
            Ok(Ok(state)) => state
                .snapshot()
                .cloned()
                .ok_or(PanelError::Cancelled(self.kind)),
            Ok(Err(_)) => Err(PanelError::Cancelled(self.kind)),
            Err(_) => Err(PanelError::Timeout {
                kind: self.kind,
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

impl Drop for PanelSubscription {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.upgrade() {
            cache.release(&(self.address.clone(), self.kind), self.entry_id);
        }
    }
}

impl std::fmt::Debug for PanelSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSubscription")
            .field("kind", &self.kind)
            .field("address", &self.address)
            .finish()
    }
}
