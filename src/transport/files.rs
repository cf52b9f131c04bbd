//! File upload key notifications.
//!
//! Uploads happen out-of-band against the url returned by
//! `files.keys.create`; a per-key websocket pushes the currently uploaded
//! set. The binding filters frames by key so a rotation can never apply a
//! stale frame to the new slot.

use crate::api::files::{parse_file_batch, RemoteFile};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Notify};
use tokio_tungstenite::{connect_async, tungstenite};
use tracing::{debug, warn};

/// Client-side attachment limits for the chat context.
pub const MAX_CHAT_FILES: usize = 3;
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("connection error: {0}")]
    Connection(#[from] tungstenite::Error),
    #[error("file {0} exceeds 2 MB")]
    TooLarge(String),
    #[error("at most {MAX_CHAT_FILES} files per chat message")]
    TooMany,
}

/// One progress frame from the per-key socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBatch {
    pub key: String,
    pub files: Vec<RemoteFile>,
}

/// Binds an upload key to one logical attachment slot (avatar, chat
/// attachment, image input field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKeyBinding {
    key: String,
}

impl FileKeyBinding {
    pub fn new(key: impl Into<String>) -> Self {
        FileKeyBinding { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Frames whose key does not match the bound key are dropped, so races
    /// after a rotation are safe.
    pub fn accepts(&self, batch: &FileBatch) -> bool {
        batch.key == self.key
    }

    /// Replace the bound key; the caller re-requests a preview redraw from
    /// the next matching frame.
    pub fn rotate(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }
}

/// Validate a prospective chat attachment set before upload.
pub fn check_chat_attachments(files: &[(String, u64)]) -> Result<(), FileError> {
    if files.len() > MAX_CHAT_FILES {
        return Err(FileError::TooMany);
    }
    for (name, size) in files {
        if *size > MAX_FILE_BYTES {
            return Err(FileError::TooLarge(name.clone()));
        }
    }
    Ok(())
}

/// Build the per-key notification socket url.
pub fn file_url(base: &str, key: &str) -> String {
    format!("{}?key={}", base, key)
}

/// Handle to an open file-key stream. Dropping the handle (or calling
/// [`close`](FileWatcher::close)) wakes the pump task, which closes the
/// socket before exiting.
pub struct FileWatcher {
    shutdown: Arc<Notify>,
}

impl FileWatcher {
    pub fn close(&self) {
        self.shutdown.notify_one();
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.close();
    }
}

/// Connect to the per-key socket and stream progress frames.
pub async fn connect(url: &str) -> Result<(FileWatcher, mpsc::Receiver<FileBatch>), FileError> {
    let (ws_stream, _) = connect_async(url).await?;
    let (write, read) = ws_stream.split();

    let shutdown = Arc::new(Notify::new());
    let (tx, rx) = mpsc::channel::<FileBatch>(32);

    tokio::spawn(pump(read, write, Arc::clone(&shutdown), tx));

    Ok((FileWatcher { shutdown }, rx))
}

/// Read frames until the stream ends or the watcher shuts down, then close
/// the sink. The shutdown arm keeps the socket from lingering on a quiet
/// stream after the owning view unmounts.
async fn pump<R, W>(mut read: R, mut write: W, shutdown: Arc<Notify>, tx: mpsc::Sender<FileBatch>)
where
    R: Stream<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
    W: Sink<tungstenite::Message> + Unpin,
{
    loop {
        let frame = tokio::select! {
            _ = shutdown.notified() => break,
            frame = read.next() => frame,
        };
        match frame {
            Some(Ok(tungstenite::Message::Text(text))) => {
                let value: serde_json::Value = match serde_json::from_str(&text) {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("unparseable file frame: {}", e);
                        continue;
                    }
                };
                match parse_file_batch(&value) {
                    Ok((key, files)) => {
                        if tx.send(FileBatch { key, files }).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("bad file frame: {}", e),
                }
            }
            Some(Ok(tungstenite::Message::Close(_))) | None => break,
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                debug!("file stream ended: {}", e);
                break;
            }
        }
    }
    let _ = write.close().await;
}
