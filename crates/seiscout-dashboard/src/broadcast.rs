//! Fan-out of live feed events to WebSocket clients.

use seiscout_core::Message;
use seiscout_feed::ConnectionState;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::types::DashboardMessage;

/// Forward feed events to `tx` until cancelled or the feed goes away.
///
/// Each event is serialized once; every client receives the same JSON.
pub async fn run_broadcaster(
    mut status_rx: watch::Receiver<ConnectionState>,
    mut message_rx: broadcast::Receiver<Message>,
    tx: broadcast::Sender<String>,
    token: CancellationToken,
) {
    info!("Dashboard broadcaster started");

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Broadcaster cancelled");
                break;
            }
            changed = status_rx.changed() => {
                if changed.is_err() {
                    debug!("Feed state channel closed");
                    break;
                }
                let state = status_rx.borrow_and_update().clone();
                publish(&tx, &DashboardMessage::status(state));
            }
            received = message_rx.recv() => match received {
                Ok(message) => publish(&tx, &DashboardMessage::Feed { message }),
                Err(RecvError::Lagged(n)) => {
                    warn!(skipped = n, "Broadcaster lagged behind the feed");
                }
                Err(RecvError::Closed) => {
                    debug!("Feed message channel closed");
                    break;
                }
            },
        }
    }

    info!("Dashboard broadcaster stopped");
}

fn publish(tx: &broadcast::Sender<String>, msg: &DashboardMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            // No receivers is normal while no client is connected.
            let receivers = tx.send(json).unwrap_or(0);
            trace!(receivers, "Broadcast dashboard message");
        }
        Err(e) => warn!(error = %e, "Failed to serialize dashboard message"),
    }
}
