//! Error types for panel polling.

use crate::kind::PanelKind;
use thiserror::Error;

pub type PanelResult<T> = Result<T, PanelError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("panel {kind} not ready within {timeout_ms}ms")]
    Timeout { kind: PanelKind, timeout_ms: u64 },

    #[error("panel {0} poller was cancelled")]
    Cancelled(PanelKind),

    #[error("invalid panel configuration: {0}")]
    InvalidConfig(String),
}
