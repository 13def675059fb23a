//! In-memory record store
//!
//! Each collection sits behind its own lock. Locks are held only for a single
//! push or snapshot clone, never across the notification send.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::types::{Document, Server};
use crate::notify::{Notifier, NotifyError};

/// Thread-safe store for servers and documents
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<RecordStoreInner>,
}

struct RecordStoreInner {
    servers: RwLock<Vec<Server>>,
    documents: RwLock<Vec<Document>>,
    notifier: Notifier,
}

impl RecordStore {
    /// Create an empty store that announces new documents on `notifier`
    pub fn new(notifier: Notifier) -> Self {
        Self::with_servers(notifier, Vec::new())
    }

    /// Create a store pre-seeded with `servers`
    pub fn with_servers(notifier: Notifier, servers: Vec<Server>) -> Self {
        Self {
            inner: Arc::new(RecordStoreInner {
                servers: RwLock::new(servers),
                documents: RwLock::new(Vec::new()),
                notifier,
            }),
        }
    }

    // ========================================================================
    // Servers
    // ========================================================================

    /// Snapshot of the server inventory in insertion order
    pub async fn list_servers(&self) -> Vec<Server> {
        let servers = self.inner.servers.read().await;
        servers.clone()
    }

    /// Append a server. Duplicates are kept.
    pub async fn add_server(&self, server: Server) {
        let count = {
            let mut servers = self.inner.servers.write().await;
            servers.push(server);
            servers.len()
        };

        tracing::debug!(count = count, "Server appended");
    }

    pub async fn server_count(&self) -> usize {
        self.inner.servers.read().await.len()
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Snapshot of stored documents in insertion order
    pub async fn list_documents(&self) -> Vec<Document> {
        let documents = self.inner.documents.read().await;
        documents.clone()
    }

    /// Append a document, then queue its text for the background worker.
    ///
    /// May wait for queue capacity after the append. If the worker is gone
    /// the document stays stored and the undelivered text is logged.
    pub async fn add_document(&self, document: Document) {
        let payload = document.text.clone();

        let count = {
            let mut documents = self.inner.documents.write().await;
            documents.push(document);
            documents.len()
        };

        tracing::debug!(count = count, "Document appended");

        if let Err(NotifyError::Closed(text)) = self.inner.notifier.send(payload).await {
            tracing::warn!(text = %text, "Notification channel closed, document not forwarded");
        }
    }

    pub async fn document_count(&self) -> usize {
        self.inner.documents.read().await.len()
    }
}
