//! Wallet error types.

use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

/// Failure of the external wallet integration.
///
/// Surfaced to the caller as-is; nothing is replaced by a simulated success.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet extension is not installed")]
    ExtensionNotFound,

    #[error("no accounts found for chain {0}")]
    NoAccounts(String),

    #[error("request rejected by user: {0}")]
    Rejected(String),

    #[error("wallet extension error: {0}")]
    Extension(String),

    #[error("chain suggestion failed: {0}")]
    SuggestChain(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl WalletError {
    /// Short label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            WalletError::ExtensionNotFound => "extension_not_found",
            WalletError::NoAccounts(_) => "no_accounts",
            WalletError::Rejected(_) => "rejected",
            WalletError::Extension(_) => "extension_error",
            WalletError::SuggestChain(_) => "suggest_chain_failed",
            WalletError::InvalidAmount(_) => "invalid_amount",
            WalletError::InvalidAddress(_) => "invalid_address",
        }
    }
}
