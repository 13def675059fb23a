//! Background worker draining the document notification queue

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::channel::NotificationReceiver;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Payload rejected: {0}")]
    Rejected(String),
}

/// Per-payload processing hook run by the worker
#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    async fn process(&self, payload: &str) -> Result<(), ProcessError>;
}

/// Default processor: records the received text in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingProcessor;

#[async_trait]
impl DocumentProcessor for LoggingProcessor {
    async fn process(&self, payload: &str) -> Result<(), ProcessError> {
        info!(text = %payload, "Worker received document");
        Ok(())
    }
}

/// Counters reported when the worker stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub processed: usize,
    pub failed: usize,
}

pub struct BackgroundWorker {
    receiver: NotificationReceiver,
    processor: Arc<dyn DocumentProcessor>,
}

impl BackgroundWorker {
    pub fn new(receiver: NotificationReceiver, processor: Arc<dyn DocumentProcessor>) -> Self {
        Self {
            receiver,
            processor,
        }
    }

    /// Run until cancelled or until every sender is gone.
    ///
    /// On cancellation the queue is closed to new sends and whatever is
    /// already buffered is processed before returning.
    pub async fn run(self, cancel: CancellationToken) -> WorkerStats {
        let Self {
            mut receiver,
            processor,
        } = self;
        let processor = processor.as_ref();
        let mut stats = WorkerStats::default();

        debug!("Background worker starting");

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("Background worker cancelled, draining queue");
                    receiver.close();
                    while let Some(payload) = receiver.recv().await {
                        process_one(processor, &payload, &mut stats).await;
                    }
                    break;
                }

                msg = receiver.recv() => {
                    match msg {
                        Some(payload) => process_one(processor, &payload, &mut stats).await,
                        None => {
                            debug!("Notification channel closed");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            processed = stats.processed,
            failed = stats.failed,
            "Background worker stopped"
        );
        stats
    }

    /// Start the worker on the runtime with its own cancellation token
    pub fn spawn(self) -> WorkerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        WorkerHandle { cancel, task }
    }
}

/// Process one payload. Errors and panics are contained here.
async fn process_one(processor: &dyn DocumentProcessor, payload: &str, stats: &mut WorkerStats) {
    match AssertUnwindSafe(processor.process(payload))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => stats.processed += 1,
        Ok(Err(e)) => {
            stats.failed += 1;
            error!(error = %e, "Failed to process document notification");
        }
        Err(_) => {
            stats.failed += 1;
            error!("Document processor panicked");
        }
    }
}

/// Supervision handle for a spawned worker
pub struct WorkerHandle {
    cancel: CancellationToken,
    task: JoinHandle<WorkerStats>,
}

impl WorkerHandle {
    /// Cancel the worker and wait up to `timeout` for it to drain.
    ///
    /// Returns `None` if the drain did not finish in time; the task is
    /// aborted in that case.
    pub async fn shutdown(mut self, timeout: Duration) -> Option<WorkerStats> {
        self.cancel.cancel();

        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(Ok(stats)) => Some(stats),
            Ok(Err(e)) => {
                error!(error = %e, "Background worker task failed");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Background worker did not drain in time, aborting"
                );
                self.task.abort();
                None
            }
        }
    }
}
