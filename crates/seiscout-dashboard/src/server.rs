//! HTTP server implementation using axum.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use seiscout_core::{Address, Navigator, Route, TabContainer, TabId};
use seiscout_feed::ConnectionState;
use seiscout_panels::{PanelKind, PanelSnapshot};
use seiscout_telemetry::{gather_text, Metrics};
use seiscout_wallet::CopyTradeRequest;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::broadcast::run_broadcaster;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::types::{
    AddressQuery, ClientCommand, CopyTradeResponse, DashboardMessage, StreamQuery, TabInfo,
    WalletConnectResponse,
};

const ENTRY_HTML: &str = include_str!("../static/entry.html");
const DASHBOARD_HTML: &str = include_str!("../static/dashboard.html");

/// Caps concurrent WebSocket connections.
#[derive(Debug)]
pub struct ConnectionLimiter {
    current: AtomicUsize,
    max: usize,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            max,
        }
    }

    /// Reserve a slot. The slot is held until the guard is dropped.
    pub fn try_acquire(self: &Arc<Self>) -> Option<ConnectionGuard> {
        loop {
            let current = self.current.load(Ordering::Acquire);
            if current >= self.max {
                return None;
            }
            if self
                .current
                .compare_exchange(current, current + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Some(ConnectionGuard {
                    limiter: Arc::clone(self),
                });
            }
        }
    }

    pub fn current_count(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

/// Owned connection slot; moves into the upgraded socket task.
#[derive(Debug)]
pub struct ConnectionGuard {
    limiter: Arc<ConnectionLimiter>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.limiter.current.fetch_sub(1, Ordering::Release);
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    dashboard: DashboardState,
    broadcast_tx: broadcast::Sender<String>,
    connection_limiter: Arc<ConnectionLimiter>,
    config: DashboardConfig,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        dashboard: DashboardState,
        broadcast_tx: broadcast::Sender<String>,
        config: DashboardConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            dashboard,
            broadcast_tx,
            connection_limiter: Arc::new(ConnectionLimiter::new(config.max_connections)),
            config,
            shutdown,
        }
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn connection_count(&self) -> usize {
        self.connection_limiter.current_count()
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/api/status", get(get_status))
        .route("/api/tabs", get(get_tabs))
        .route("/api/panels/{tab}", get(get_panel))
        .route("/api/wallet/connect", post(connect_wallet))
        .route("/api/wallet/copy-trade", post(copy_trade));
    let api = if state.config.cors_permissive {
        api.layer(CorsLayer::permissive())
    } else {
        api
    };

    Router::new()
        .route("/", get(serve_entry))
        .route("/search", get(search))
        .route("/dashboard", get(serve_dashboard))
        .route("/ws", get(ws_handler))
        .route("/metrics", get(get_metrics))
        .merge(api)
        .with_state(state)
}

async fn serve_entry() -> Html<&'static str> {
    Html(ENTRY_HTML)
}

/// Search submission from the entry view.
async fn search(Query(query): Query<AddressQuery>) -> Response {
    let mut navigator = Navigator::new();
    match navigator.submit_address(query.addr.as_deref().unwrap_or_default()) {
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Ok(Some(route)) => Redirect::to(&route.path()).into_response(),
        Err(e) => DashboardError::from(e).into_response(),
    }
}

/// Dashboard view. Without a usable address the client goes back to entry.
async fn serve_dashboard(Query(query): Query<AddressQuery>) -> Response {
    let mut navigator = Navigator::new();
    match navigator.on_dashboard_mount(query.addr.as_deref()) {
        Route::Entry => Redirect::to(&Route::Entry.path()).into_response(),
        Route::Dashboard { address } => {
            debug!(%address, "Serving dashboard view");
            Html(DASHBOARD_HTML).into_response()
        }
    }
}

async fn get_status(State(state): State<AppState>) -> Json<ConnectionState> {
    Json(state.dashboard.status())
}

async fn get_tabs(State(state): State<AppState>) -> Json<Vec<TabInfo>> {
    Json(state.dashboard.tabs())
}

/// First ready snapshot of one panel, shared with every other consumer of
/// the same address and panel.
async fn get_panel(
    State(state): State<AppState>,
    Path(tab): Path<String>,
    Query(query): Query<AddressQuery>,
) -> DashboardResult<Json<PanelSnapshot>> {
    let tab = parse_tab(&tab)?;
    let address = require_address(query.addr.as_deref())?;

    let mut subscription = state
        .dashboard
        .panels()
        .subscribe(&address, PanelKind::from(tab));
    let snapshot = subscription
        .wait_ready(state.config.panel_timeout())
        .await
        .map_err(|e| {
            warn!(%address, tab = %tab, error = %e, "Panel did not become ready");
            e
        })?;
    Ok(Json(snapshot))
}

async fn connect_wallet(
    State(state): State<AppState>,
) -> DashboardResult<Json<WalletConnectResponse>> {
    let session = state.dashboard.wallet().connect().await?;
    Ok(Json(WalletConnectResponse { ok: true, session }))
}

async fn copy_trade(
    State(state): State<AppState>,
    Json(request): Json<CopyTradeRequest>,
) -> DashboardResult<Json<CopyTradeResponse>> {
    let wallet = state.dashboard.wallet();
    let session = wallet.connect().await?;
    let trade = wallet.copy_trade(&session, request).await?;
    Ok(Json(CopyTradeResponse { ok: true, trade }))
}

async fn get_metrics() -> DashboardResult<Response> {
    let body = gather_text().map_err(|e| DashboardError::Metrics(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}

fn parse_tab(slug: &str) -> DashboardResult<TabId> {
    slug.parse::<TabId>()
        .map_err(|_| DashboardError::UnknownTab(slug.to_string()))
}

fn require_address(raw: Option<&str>) -> DashboardResult<Address> {
    let raw = raw.ok_or(DashboardError::MissingAddress)?;
    Ok(Address::parse(raw)?)
}

/// WebSocket upgrade handler.
async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let address = match require_address(query.addr.as_deref()) {
        Ok(address) => address,
        Err(e) => return e.into_response(),
    };
    let tab = match query.tab.as_deref().map(parse_tab).transpose() {
        Ok(tab) => tab.unwrap_or_default(),
        Err(e) => return e.into_response(),
    };

    let guard = match state.connection_limiter.try_acquire() {
        Some(guard) => guard,
        None => {
            warn!(
                current = state.connection_limiter.current_count(),
                max = state.connection_limiter.max(),
                "WebSocket connection limit reached"
            );
            return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, address, tab, guard))
}

/// Handle a WebSocket connection.
async fn handle_ws_connection(
    socket: WebSocket,
    state: AppState,
    address: Address,
    tab: TabId,
    _guard: ConnectionGuard,
) {
    Metrics::client_connected();
    info!(
        %address,
        tab = %tab,
        connections = state.connection_limiter.current_count(),
        "Dashboard client connected"
    );

    stream_dashboard(socket, &state, &address, tab).await;

    Metrics::client_disconnected();
    info!(%address, "Dashboard client disconnected");
}

async fn stream_dashboard(socket: WebSocket, state: &AppState, address: &Address, tab: TabId) {
    let (mut sender, mut receiver) = socket.split();
    let mut broadcast_rx = state.broadcast_tx.subscribe();
    let panels = state.dashboard.panels();
    let mut tabs = TabContainer::new(tab);
    let mut panel = panels.subscribe(address, PanelKind::from(tab));

    let initial = [
        DashboardMessage::status(state.dashboard.status()),
        DashboardMessage::Panel {
            tab,
            state: panel.current(),
        },
    ];
    for msg in &initial {
        if !send_message(&mut sender, msg).await {
            debug!("Failed to send initial state, client disconnected");
            return;
        }
    }

    // Parsed commands are handed to the main loop so replies share one sink.
    let (command_tx, mut command_rx) = mpsc::channel::<Result<ClientCommand, String>>(16);
    let mut incoming_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    let command =
                        serde_json::from_str::<ClientCommand>(text.as_str()).map_err(|e| e.to_string());
                    if command_tx.send(command).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        let mut outgoing = Vec::new();

        tokio::select! {
            _ = state.shutdown.cancelled() => {
                debug!("Server shutting down, closing connection");
                break;
            }
            result = broadcast_rx.recv() => {
                match result {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            debug!("Failed to send message, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "WebSocket client lagged, catching up");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }
            next = panel.next_state() => {
                let active = tabs.active();
                match next {
                    Some(panel_state) => outgoing.push(DashboardMessage::Panel {
                        tab: active,
                        state: panel_state,
                    }),
                    None => {
                        // Poller was invalidated; start over for the same tab.
                        debug!(%address, tab = %active, "Panel subscription closed, resubscribing");
                        panel = panels.subscribe(address, PanelKind::from(active));
                        outgoing.push(DashboardMessage::Panel {
                            tab: active,
                            state: panel.current(),
                        });
                    }
                }
            }
            Some(command) = command_rx.recv() => {
                match command {
                    Ok(ClientCommand::SelectTab { tab }) => {
                        let previous = tabs.select_tab(tab);
                        if previous != tab {
                            debug!(%address, from = %previous, to = %tab, "Tab selected");
                            // Replacing the subscription releases the previous panel.
                            panel = panels.subscribe(address, PanelKind::from(tab));
                            outgoing.push(DashboardMessage::Tab { active: tab, previous });
                            outgoing.push(DashboardMessage::Panel {
                                tab,
                                state: panel.current(),
                            });
                        }
                    }
                    Ok(ClientCommand::Send { message }) => {
                        if let Err(e) = state.dashboard.feed().send(message) {
                            outgoing.push(DashboardMessage::error(e.to_string()));
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "Invalid client command");
                        outgoing.push(DashboardMessage::error(format!("invalid command: {e}")));
                    }
                }
            }
            _ = &mut incoming_task => {
                debug!("Incoming task completed, closing connection");
                break;
            }
        }

        let mut delivered = true;
        for msg in &outgoing {
            if !send_message(&mut sender, msg).await {
                delivered = false;
                break;
            }
        }
        if !delivered {
            debug!("Failed to send message, client disconnected");
            break;
        }
    }

    incoming_task.abort();
}

/// Serialize and send one message. Returns `false` once the client is gone.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &DashboardMessage,
) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize dashboard message");
            true
        }
    }
}

/// Serve the dashboard on an already bound listener until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    dashboard: DashboardState,
    config: DashboardConfig,
    shutdown: CancellationToken,
) -> DashboardResult<()> {
    let (broadcast_tx, _) = broadcast::channel::<String>(config.broadcast_capacity);

    let broadcaster_token = shutdown.child_token();
    let broadcaster = tokio::spawn(run_broadcaster(
        dashboard.feed().subscribe(),
        dashboard.feed().messages(),
        broadcast_tx.clone(),
        broadcaster_token.clone(),
    ));

    let state = AppState::new(dashboard, broadcast_tx, config, shutdown.child_token());
    let app = create_router(state);

    match listener.local_addr() {
        Ok(addr) => info!(%addr, "Dashboard server listening"),
        Err(e) => warn!(error = %e, "Dashboard server listening on unknown address"),
    }

    let graceful = shutdown.clone();
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move { graceful.cancelled().await })
        .await;

    broadcaster_token.cancel();
    let _ = broadcaster.await;
    info!("Dashboard server stopped");
    result.map_err(DashboardError::from)
}

/// Bind `config.bind_addr()` and serve.
pub async fn run_server(
    dashboard: DashboardState,
    config: DashboardConfig,
    shutdown: CancellationToken,
) -> DashboardResult<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, dashboard, config, shutdown).await
}
