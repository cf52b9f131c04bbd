//! Per-order chat stream.
//!
//! One websocket per open order view. Frames are appended in arrival order;
//! chronological reordering of late frames is deliberately not attempted.
//! A stream error ends the view-local task silently; reconnection happens
//! only when the user re-enters the view.

use crate::domain::Message;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("connection error: {0}")]
    Connection(#[from] tungstenite::Error),
    #[error("message needs text or files")]
    EmptyMessage,
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("channel closed")]
    ChannelClosed,
}

/// Outgoing chat frame: either `text` or `files_key` must be present.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutgoing {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_key: Option<String>,
}

impl ChatOutgoing {
    pub fn new(role: &str, text: Option<String>, files_key: Option<String>) -> Result<Self, ChatError> {
        let has_text = text.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false);
        if !has_text && files_key.is_none() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(ChatOutgoing {
            role: role.to_string(),
            text,
            files_key,
        })
    }
}

/// Build the chat socket url for one order.
pub fn chat_url(base: &str, token: &str, order_id: i64) -> String {
    format!("{}?token={}&order_id={}", base, token, order_id)
}

/// Live handle to an open chat stream. Dropping the handle (or calling
/// [`close`](ChatHandle::close)) cancels both pump tasks.
pub struct ChatHandle {
    out_tx: mpsc::Sender<ChatOutgoing>,
    cancel: Arc<AtomicBool>,
}

impl ChatHandle {
    pub async fn send(&self, message: ChatOutgoing) -> Result<(), ChatError> {
        self.out_tx
            .send(message)
            .await
            .map_err(|_| ChatError::ChannelClosed)
    }

    /// Cooperative cancellation: the flag is read between awaits in both
    /// pump tasks; owned sockets close when the tasks end.
    pub fn close(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

impl Drop for ChatHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Connect and return a handle plus the inbound message stream.
pub async fn connect(url: &str) -> Result<(ChatHandle, mpsc::Receiver<Message>), ChatError> {
    let (ws_stream, _) = connect_async(url).await?;
    let (mut write, mut read) = ws_stream.split();

    let cancel = Arc::new(AtomicBool::new(false));
    let (out_tx, mut out_rx) = mpsc::channel::<ChatOutgoing>(32);
    let (in_tx, in_rx) = mpsc::channel::<Message>(256);

    let write_cancel = Arc::clone(&cancel);
    tokio::spawn(async move {
        while let Some(outgoing) = out_rx.recv().await {
            if write_cancel.load(Ordering::Relaxed) {
                break;
            }
            let json = match serde_json::to_string(&outgoing) {
                Ok(j) => j,
                Err(e) => {
                    warn!("chat frame serialization failed: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(tungstenite::Message::Text(json)).await {
                // Background failure stays silent for the user.
                debug!("chat write ended: {}", e);
                break;
            }
        }
        let _ = write.close().await;
    });

    let read_cancel = Arc::clone(&cancel);
    tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            if read_cancel.load(Ordering::Relaxed) {
                break;
            }
            match frame {
                Ok(tungstenite::Message::Text(text)) => {
                    match serde_json::from_str::<Message>(&text) {
                        Ok(message) => {
                            if in_tx.send(message).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("unparseable chat frame: {}", e),
                    }
                }
                Ok(tungstenite::Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!("chat stream ended: {}", e);
                    break;
                }
            }
        }
    });

    Ok((ChatHandle { out_tx, cancel }, in_rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_requires_content() {
        assert!(matches!(
            ChatOutgoing::new("user", None, None),
            Err(ChatError::EmptyMessage)
        ));
        assert!(matches!(
            ChatOutgoing::new("user", Some("  ".to_string()), None),
            Err(ChatError::EmptyMessage)
        ));
        assert!(ChatOutgoing::new("user", Some("hi".to_string()), None).is_ok());
        assert!(ChatOutgoing::new("user", None, Some("K1".to_string())).is_ok());
    }

    #[test]
    fn test_outgoing_serialization_omits_missing() {
        let m = ChatOutgoing::new("user", Some("hi".to_string()), None).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["text"], "hi");
        assert!(json.get("files_key").is_none());
    }

    #[test]
    fn test_chat_url() {
        assert_eq!(
            chat_url("wss://x/chat", "T", 9),
            "wss://x/chat?token=T&order_id=9"
        );
    }
}
