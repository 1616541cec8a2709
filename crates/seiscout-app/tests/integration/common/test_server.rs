//! In-process SeiScout server for integration tests.

use futures_util::StreamExt;
use seiscout_app::{AppConfig, AppResult, Application};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A running application bound to `127.0.0.1:0`.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<AppResult<()>>,
}

/// Fast timings so tests finish in well under a second per step.
pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.feed.handshake_delay_ms = 50;
    config.feed.message_interval_ms = 100;
    config.feed.seed = Some(3);
    config.panels.time_scale = 0.01;
    config.panels.seed = Some(5);
    config.dashboard.panel_timeout_ms = 2_000;
    config.wallet.demo = true;
    config
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(fast_config()).await
    }

    pub async fn start_with(config: AppConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Application::new(config).unwrap();
        let shutdown = app.shutdown_token();
        let handle = tokio::spawn(app.run_with_listener(listener));
        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// HTTP client that reports redirects instead of following them.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    pub async fn ws(&self, addr: &str, tab: &str) -> WsClient {
        let url = format!("ws://{}/ws?addr={}&tab={}", self.addr, addr, tab);
        let (stream, _) = connect_async(url).await.unwrap();
        stream
    }

    /// Stop the application and return its result.
    pub async fn shutdown(self) -> AppResult<()> {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .unwrap()
            .unwrap()
    }
}

/// Next JSON text frame, skipping control frames.
pub async fn next_json(ws: &mut WsClient) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

/// Read frames until one matches, returning it and everything seen before.
pub async fn read_until<F>(ws: &mut WsClient, pred: F) -> (serde_json::Value, Vec<serde_json::Value>)
where
    F: Fn(&serde_json::Value) -> bool,
{
    let mut seen = Vec::new();
    loop {
        let msg = next_json(ws).await;
        if pred(&msg) {
            return (msg, seen);
        }
        seen.push(msg);
    }
}

/// Ready panel message for `tab`.
pub fn is_ready_panel(msg: &serde_json::Value, tab: &str) -> bool {
    msg["type"] == "panel" && msg["tab"] == tab && msg["state"]["state"] == "ready"
}
