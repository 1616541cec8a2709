//! Dashboard error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use seiscout_core::CoreError;
use seiscout_feed::FeedError;
use seiscout_panels::PanelError;
use seiscout_wallet::WalletError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown tab: {0}")]
    UnknownTab(String),

    #[error("missing address parameter")]
    MissingAddress,

    #[error(transparent)]
    Address(#[from] CoreError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error("wallet connection failed: {0}")]
    Wallet(#[from] WalletError),

    #[error("feed rejected message: {0}")]
    Feed(#[from] FeedError),

    #[error("metrics unavailable: {0}")]
    Metrics(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::UnknownTab(_) => StatusCode::NOT_FOUND,
            DashboardError::MissingAddress | DashboardError::Address(_) => StatusCode::BAD_REQUEST,
            DashboardError::Panel(PanelError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            DashboardError::Panel(PanelError::Cancelled(_)) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Wallet(_) => StatusCode::FAILED_DEPENDENCY,
            DashboardError::Panel(PanelError::InvalidConfig(_))
            | DashboardError::Feed(_)
            | DashboardError::Metrics(_)
            | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "ok": false, "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seiscout_panels::PanelKind;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DashboardError::UnknownTab("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DashboardError::MissingAddress.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DashboardError::Address(CoreError::EmptyAddress).status_code(),
            StatusCode::BAD_REQUEST
        );
        let timeout = PanelError::Timeout {
            kind: PanelKind::Overview,
            timeout_ms: 5,
        };
        assert_eq!(
            DashboardError::Panel(timeout).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            DashboardError::Wallet(WalletError::Rejected("no".into())).status_code(),
            StatusCode::FAILED_DEPENDENCY
        );
    }

    #[test]
    fn test_wallet_message() {
        let err = DashboardError::from(WalletError::ExtensionNotFound);
        assert_eq!(
            err.to_string(),
            "wallet connection failed: wallet extension is not installed"
        );
    }
}
