//! Document notification pipeline
//!
//! Decouples document intake from downstream processing:
//!
//! - `channel`: bounded FIFO queue with backpressure
//! - `worker`: supervised background consumer with a pluggable processor

mod channel;
mod worker;

pub use channel::{notification_channel, NotificationReceiver, Notifier, NotifyError};
pub use worker::{
    BackgroundWorker, DocumentProcessor, LoggingProcessor, ProcessError, WorkerHandle, WorkerStats,
};
