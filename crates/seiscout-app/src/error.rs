//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] seiscout_feed::FeedError),

    #[error("Panel error: {0}")]
    Panel(#[from] seiscout_panels::PanelError),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] seiscout_dashboard::DashboardError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] seiscout_telemetry::TelemetryError),

    #[error("Task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
