//! WebSocket bridge between the host and the browser panel
//!
//! One connection per open page. The host pushes the full settings document
//! as the first frame and again after every accepted update, so the panel
//! always reflects what was actually saved. The page sends settings updates
//! and peer-connect requests; nothing is acknowledged beyond the re-push.

use std::sync::Arc;

use anyhow::Result;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use peerchat_web_protocol::{HostMessage, UiMessage};

use crate::config::PeerConfig;
use crate::peers;
use crate::settings::{SettingsStore, StoreError};

/// Accept loop. The listener is bound by the caller so tests can use an
/// ephemeral port.
pub async fn serve(
    listener: TcpListener,
    store: Arc<Mutex<SettingsStore>>,
    peer_config: PeerConfig,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(addr = %addr, "settings bridge listening");

    loop {
        match listener.accept().await {
            Ok((stream, remote)) => {
                let store = store.clone();
                let peer_config = peer_config.clone();

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, store, peer_config).await {
                        warn!(error = %e, remote = %remote, "bridge connection error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "accept failed");
            }
        }
    }
}

/// Handle a single panel connection
async fn handle_connection(
    stream: TcpStream,
    store: Arc<Mutex<SettingsStore>>,
    peer_config: PeerConfig,
) -> Result<()> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut tx, mut rx) = ws.split();

    // First frame is always the current document.
    let hello = {
        let store = store.lock().await;
        HostMessage::LoadSettings(store.document().clone()).to_json()?
    };
    tx.send(Message::Text(hello)).await?;

    while let Some(frame) = rx.next().await {
        match frame {
            Ok(Message::Text(text)) => match UiMessage::from_json(&text) {
                Ok(msg) => {
                    if let Some(push) = handle_ui_message(msg, &store, &peer_config).await {
                        tx.send(Message::Text(push)).await?;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "undecodable frame from panel");
                }
            },
            Ok(Message::Ping(payload)) => {
                tx.send(Message::Pong(payload)).await?;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "bridge read error");
                break;
            }
        }
    }

    Ok(())
}

/// Dispatch one message from the panel; returns a frame to push back, if any.
async fn handle_ui_message(
    msg: UiMessage,
    store: &Arc<Mutex<SettingsStore>>,
    peer_config: &PeerConfig,
) -> Option<String> {
    match msg {
        UiMessage::UpdateSettings(update) => {
            debug!(fields = ?update.misc_values(), "settings update received");
            let mut store = store.lock().await;
            match store.apply_update(&update) {
                Ok(document) => {
                    info!(username = %document.username, "settings saved");
                    HostMessage::LoadSettings(document.clone()).to_json().ok()
                }
                Err(StoreError::Rejected(reason)) => {
                    warn!(%reason, "settings update rejected");
                    None
                }
                Err(e) => {
                    error!(error = %e, "failed to save settings");
                    None
                }
            }
        }
        UiMessage::ConnectToPeer { address } => {
            let peer_config = peer_config.clone();
            tokio::spawn(async move {
                peers::connect(&address, &peer_config).await;
            });
            None
        }
    }
}
