//! Bounded hand-off queue from document intake to the background worker
//!
//! Senders wait for free capacity instead of dropping payloads. Delivery to
//! the single receiver is FIFO.

use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The receiving side has been closed or dropped. Carries the undelivered payload.
    #[error("Notification channel closed")]
    Closed(String),
}

/// Sending half, cheap to clone
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<String>,
}

/// Receiving half, owned by the background worker
#[derive(Debug)]
pub struct NotificationReceiver {
    rx: mpsc::Receiver<String>,
}

/// Create a notification channel holding at most `capacity` queued payloads.
///
/// A capacity of zero is treated as one.
pub fn notification_channel(capacity: usize) -> (Notifier, NotificationReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Notifier { tx }, NotificationReceiver { rx })
}

impl Notifier {
    /// Enqueue a payload, waiting while the queue is full
    pub async fn send(&self, payload: String) -> Result<(), NotifyError> {
        self.tx
            .send(payload)
            .await
            .map_err(|mpsc::error::SendError(payload)| NotifyError::Closed(payload))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl NotificationReceiver {
    /// Wait for the next payload. Returns `None` once the channel is closed
    /// and empty.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Refuse further sends. Payloads already queued can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
