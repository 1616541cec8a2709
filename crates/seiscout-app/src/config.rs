//! Application configuration.

use crate::error::{AppError, AppResult};
use seiscout_dashboard::DashboardConfig;
use seiscout_feed::FeedConfig;
use seiscout_panels::PanelsConfig;
use seiscout_wallet::ChainConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SEISCOUT_CONFIG";

/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Wallet configuration (`[wallet]`).
///
/// Chain registration options are read from `SEISCOUT_*` environment
/// variables, not from this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Back the connector with the simulated demo wallet.
    #[serde(default)]
    pub demo: bool,
}

impl WalletConfig {
    pub fn chain(&self) -> ChainConfig {
        ChainConfig::from_env()
    }
}

/// Telemetry configuration (`[telemetry]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter used when `RUST_LOG` is unset, e.g. `"info,seiscout=debug"`.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub panels: PanelsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Cli(String),
    Env(String),
    DefaultFile(String),
    /// No file found; built-in defaults.
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Cli(path) => write!(f, "{path} (--config)"),
            ConfigSource::Env(path) => write!(f, "{path} ({CONFIG_ENV})"),
            ConfigSource::DefaultFile(path) => f.write_str(path),
            ConfigSource::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Resolve and load the configuration: `--config` > `SEISCOUT_CONFIG` >
    /// `config/default.toml` > built-in defaults.
    ///
    /// Runs before logging is initialized, so the caller reports the source.
    pub fn load(cli_path: Option<&str>) -> AppResult<(Self, ConfigSource)> {
        Self::load_from(
            cli_path,
            std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()),
            DEFAULT_CONFIG_PATH,
        )
    }

    fn load_from(
        cli_path: Option<&str>,
        env_path: Option<String>,
        default_path: &str,
    ) -> AppResult<(Self, ConfigSource)> {
        if let Some(path) = cli_path {
            return Ok((Self::from_file(path)?, ConfigSource::Cli(path.to_string())));
        }
        if let Some(path) = env_path {
            let config = Self::from_file(&path)?;
            return Ok((config, ConfigSource::Env(path)));
        }
        if Path::new(default_path).exists() {
            let config = Self::from_file(default_path)?;
            return Ok((config, ConfigSource::DefaultFile(default_path.to_string())));
        }
        Ok((Self::default(), ConfigSource::BuiltIn))
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.feed.validate()?;
        self.panels.validate()?;
        if self.dashboard.max_connections == 0 {
            return Err(AppError::Config(
                "dashboard.max_connections must be > 0".to_string(),
            ));
        }
        if self.dashboard.broadcast_capacity == 0 {
            return Err(AppError::Config(
                "dashboard.broadcast_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
