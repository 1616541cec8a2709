//! Wallet address parameter.
//!
//! The address is the only value carried from the entry view to the
//! dashboard view and down into every panel. It is an opaque identifier:
//! only its shape is checked, never its checksum.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted address length in characters.
pub const MAX_ADDRESS_LEN: usize = 128;

/// Opaque wallet address.
///
/// Accepted shape: 1..=128 ASCII alphanumeric characters after trimming.
/// The restricted alphabet keeps the value safe to embed verbatim in a
/// query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate a raw address string.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyAddress);
        }
        if trimmed.len() > MAX_ADDRESS_LEN {
            return Err(CoreError::InvalidAddress(format!(
                "length {} exceeds {MAX_ADDRESS_LEN}",
                trimmed.len()
            )));
        }
        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidAddress(format!(
                "unexpected character {bad:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse an optional query value, treating empty input as absent.
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| Self::parse(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form: first `head` and last `tail` characters.
    ///
    /// Returns the full address when it is not longer than `head + tail`.
    pub fn short(&self, head: usize, tail: usize) -> String {
        let s = &self.0;
        if s.len() <= head + tail {
            return s.clone();
        }
        format!("{}...{}", &s[..head], &s[s.len() - tail..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
