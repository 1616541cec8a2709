//! Application lifecycle.

use std::sync::Arc;

use seiscout_dashboard::{serve, DashboardResult, DashboardState};
use seiscout_feed::LiveFeed;
use seiscout_panels::PanelCache;
use seiscout_wallet::WalletConnector;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Owns every long-lived service. Each is constructed exactly once.
pub struct Application {
    config: AppConfig,
    feed: Arc<LiveFeed>,
    panels: PanelCache,
    wallet: Arc<WalletConnector>,
    shutdown: CancellationToken,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let feed = Arc::new(LiveFeed::new(config.feed.clone())?);
        let panels = PanelCache::new(config.panels.clone())?;

        let chain = config.wallet.chain();
        let wallet = if config.wallet.demo {
            warn!("Wallet demo mode enabled: signatures are simulated");
            WalletConnector::demo(chain)
        } else {
            WalletConnector::new(None, chain)
        };

        Ok(Self {
            config,
            feed,
            panels,
            wallet: Arc::new(wallet),
            shutdown: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn feed(&self) -> &Arc<LiveFeed> {
        &self.feed
    }

    pub fn panels(&self) -> &PanelCache {
        &self.panels
    }

    /// Cancelling this token stops `run()` as Ctrl-C would.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn dashboard_state(&self) -> DashboardState {
        DashboardState::new(
            Arc::clone(&self.feed),
            self.panels.clone(),
            Arc::clone(&self.wallet),
        )
    }

    /// Bind the configured address and run until shutdown.
    pub async fn run(self) -> AppResult<()> {
        let listener = TcpListener::bind(self.config.dashboard.bind_addr()).await?;
        self.run_with_listener(listener).await
    }

    /// Run on an already bound listener until Ctrl-C, `shutdown_token()`
    /// or a server failure.
    pub async fn run_with_listener(self, listener: TcpListener) -> AppResult<()> {
        info!(
            handshake_delay_ms = self.config.feed.handshake_delay_ms,
            message_interval_ms = self.config.feed.message_interval_ms,
            time_scale = self.config.panels.time_scale,
            demo_wallet = self.config.wallet.demo,
            "Starting SeiScout"
        );
        self.feed.start()?;

        let mut server = tokio::spawn(serve(
            listener,
            self.dashboard_state(),
            self.config.dashboard.clone(),
            self.shutdown.clone(),
        ));

        let result = tokio::select! {
            joined = &mut server => {
                warn!("Dashboard server exited before shutdown was requested");
                server_result(joined)
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                self.shutdown.cancel();
                server_result(server.await)
            }
            _ = self.shutdown.cancelled() => {
                info!("Shutdown requested");
                server_result(server.await)
            }
        };

        self.shutdown.cancel();
        self.feed.stop().await;
        let cached = self.panels.len();
        self.panels.clear();
        info!(cached_panels = cached, "SeiScout stopped");

        result
    }
}

fn server_result(joined: Result<DashboardResult<()>, JoinError>) -> AppResult<()> {
    match joined {
        Ok(result) => result.map_err(AppError::from),
        Err(e) => Err(AppError::Task(e.to_string())),
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("feed", &self.feed)
            .field("panels", &self.panels.len())
            .field("wallet", &self.wallet)
            .finish()
    }
}
