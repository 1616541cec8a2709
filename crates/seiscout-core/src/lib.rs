//! Core domain types for the SeiScout dashboard.
//!
//! This crate provides the types shared by every other crate:
//! - `Address`: the opaque wallet address threaded from the entry view
//!   into every panel
//! - `Severity`, `RiskLevel`, `PulseTier`: closed display variants with
//!   an explicit mapping to badge attributes
//! - `Message`: items published by the live feed
//! - `Bounded`: clamped numeric metric
//! - `Navigator`, `Route`: entry/dashboard navigation shell
//! - `TabContainer`, `TabId`: dashboard tab selection

pub mod address;
pub mod bounded;
pub mod error;
pub mod message;
pub mod navigation;
pub mod tabs;
pub mod variant;

pub use address::{Address, MAX_ADDRESS_LEN};
pub use bounded::Bounded;
pub use error::{CoreError, Result};
pub use message::{AlertType, Message, MessageKind, MessagePayload};
pub use navigation::{Navigator, Route};
pub use tabs::{TabContainer, TabId};
pub use variant::{Badge, PulseTier, RiskLevel, Severity, Tone};
