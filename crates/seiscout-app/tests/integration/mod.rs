//! Integration tests for seiscout-app.
//!
//! These tests run the real service on an ephemeral port:
//! - navigation routes (search, dashboard guard)
//! - panel API over the shared cache
//! - WebSocket stream and tab switching

pub mod common;
