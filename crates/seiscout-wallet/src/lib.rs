//! Wallet integration for SeiScout.
//!
//! The dashboard talks to a browser wallet through the `WalletExtension`
//! trait. Failures are returned to the caller as `WalletError`; a simulated
//! wallet is only used when the connector is explicitly built in demo mode.

pub mod chain;
pub mod coin;
pub mod connector;
pub mod demo;
pub mod error;
pub mod extension;

pub use chain::{ChainConfig, ChainInfo, DEFAULT_CHAIN_ID};
pub use coin::Coin;
pub use connector::{CopyTradeRequest, SignedCopyTrade, WalletConnector, WalletSession};
pub use demo::{DemoWallet, DEMO_ADDRESS};
pub use error::{WalletError, WalletResult};
pub use extension::{AccountData, AminoSignResponse, StdSignDoc, WalletExtension};
