//! Best-effort clipboard side channel for yanks.
//!
//! A yank is committed to the register store before the clipboard is touched,
//! and a clipboard failure never rolls that back: callers log the error and
//! move on. [`ClipboardWorker`] moves the actual write onto a background
//! thread so a slow system clipboard never stalls key handling.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, unbounded};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
    #[error("clipboard worker disconnected")]
    Disconnected,
}

/// Destination for yanked text.
pub trait ClipboardSink {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

impl<S: ClipboardSink + ?Sized> ClipboardSink for Arc<S> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

impl<S: ClipboardSink + ?Sized> ClipboardSink for Box<S> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// Discards everything. Used when no clipboard is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClipboard;

impl ClipboardSink for NoopClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

/// Queues clipboard writes to a dedicated thread.
///
/// `write_text` only fails when the thread is gone; errors from the wrapped
/// sink are logged on the worker side (target `clipboard`). Dropping the
/// worker closes the queue and joins the thread, so every queued write has
/// been attempted once `drop` returns.
pub struct ClipboardWorker {
    tx: Option<Sender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl ClipboardWorker {
    /// Run `sink` on the worker thread.
    pub fn spawn<S>(sink: S) -> Result<Self, ClipboardError>
    where
        S: ClipboardSink + Send + 'static,
    {
        Self::spawn_with(move || Ok(sink))
    }

    /// Build the sink on the worker thread itself. Platform clipboards are
    /// not always `Send`, so they are constructed where they are used.
    pub fn spawn_with<S, F>(factory: F) -> Result<Self, ClipboardError>
    where
        S: ClipboardSink + 'static,
        F: FnOnce() -> Result<S, ClipboardError> + Send + 'static,
    {
        let (tx, rx) = unbounded::<String>();
        let handle = thread::Builder::new()
            .name("modal-clipboard".into())
            .spawn(move || {
                let sink = match factory() {
                    Ok(sink) => sink,
                    Err(e) => {
                        warn!(target: "clipboard", error = %e, "clipboard_init_failed");
                        // Drain so senders never observe a closed queue mid-session.
                        for _ in rx.iter() {}
                        return;
                    }
                };
                for text in rx.iter() {
                    match sink.write_text(&text) {
                        Ok(()) => {
                            debug!(target: "clipboard", len = text.len(), "clipboard_written")
                        }
                        Err(e) => {
                            warn!(target: "clipboard", error = %e, "clipboard_write_failed")
                        }
                    }
                }
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }
}

impl ClipboardSink for ClipboardWorker {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let tx = self.tx.as_ref().ok_or(ClipboardError::Disconnected)?;
        tx.send(text.to_owned())
            .map_err(|_| ClipboardError::Disconnected)
    }
}

impl Drop for ClipboardWorker {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!(target: "clipboard", "clipboard_worker_panicked");
        }
    }
}

/// The OS clipboard through `arboard`.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: std::sync::Mutex<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self {
            inner: std::sync::Mutex::new(inner),
        })
    }
}

#[cfg(feature = "system-clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = self
            .inner
            .lock()
            .map_err(|_| ClipboardError::Write("clipboard lock poisoned".into()))?;
        cb.set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
