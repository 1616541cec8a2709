//! Navigation shell.
//!
//! Two states only:
//!
//! ```text
//! Entry --(address provided)--> Dashboard --(new search)--> Entry
//! ```
//!
//! The address is the single cross-view parameter and travels in the
//! dashboard URL as `?addr=`.

use crate::address::Address;
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// Query parameter that carries the address.
pub const ADDRESS_QUERY_PARAM: &str = "addr";

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    /// Landing/search view.
    Entry,
    /// Multi-panel dashboard scoped to one address.
    Dashboard { address: Address },
}

impl Route {
    /// URL path (with query) for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Entry => "/".to_string(),
            Route::Dashboard { address } => {
                format!("/dashboard?{ADDRESS_QUERY_PARAM}={address}")
            }
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Route::Entry => None,
            Route::Dashboard { address } => Some(address),
        }
    }
}

/// Navigation state machine.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Route::Entry,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Submit the search field.
    ///
    /// - Empty or whitespace-only input is a no-op: returns `Ok(None)` and
    ///   the current route is unchanged.
    /// - Malformed input returns the parse error, also without a transition.
    /// - Otherwise transitions to the dashboard and returns the new route.
    pub fn submit_address(&mut self, raw: &str) -> Result<Option<Route>> {
        if raw.trim().is_empty() {
            debug!("Empty search submitted, staying on entry view");
            return Ok(None);
        }
        let address = Address::parse(raw)?;
        self.current = Route::Dashboard { address };
        debug!(route = %self.current.path(), "Navigated to dashboard");
        Ok(Some(self.current.clone()))
    }

    /// Resolve the dashboard view from its query value.
    ///
    /// A missing, empty or malformed address redirects to the entry view.
    pub fn on_dashboard_mount(&mut self, query_value: Option<&str>) -> Route {
        self.current = match Address::from_optional(query_value) {
            Some(address) => Route::Dashboard { address },
            None => {
                debug!("Dashboard opened without a usable address, redirecting to entry");
                Route::Entry
            }
        };
        self.current.clone()
    }

    /// Leave the dashboard for a new search.
    pub fn new_search(&mut self) -> Route {
        self.current = Route::Entry;
        Route::Entry
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
