//! Panel snapshots and poller state.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use seiscout_core::Address;
use serde::Serialize;

use crate::data::PanelData;
use crate::kind::PanelKind;

/// One published version of a panel's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub kind: PanelKind,
    pub address: Address,
    /// 0 for the initial load, then +1 per tick.
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub data: PanelData,
}

impl PanelSnapshot {
    pub(crate) fn initial(kind: PanelKind, address: Address, rng: &mut StdRng) -> Self {
        Self {
            kind,
            address,
            revision: 0,
            updated_at: Utc::now(),
            data: PanelData::baseline(kind, rng),
        }
    }

    /// Snapshot derived from this one by a single tick.
    pub(crate) fn next(&self, rng: &mut StdRng) -> Self {
        let mut data = self.data.clone();
        data.tick(rng);
        Self {
            kind: self.kind,
            address: self.address.clone(),
            revision: self.revision + 1,
            updated_at: Utc::now(),
            data,
        }
    }
}

/// What a panel currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    /// No address; nothing scheduled.
    Idle,
    /// Initial load pending.
    Loading,
    Ready(PanelSnapshot),
}

impl PanelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, PanelState::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&PanelSnapshot> {
        match self {
            PanelState::Ready(s) => Some(s),
            _ => None,
        }
    }
}
