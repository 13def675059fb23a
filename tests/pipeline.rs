//! End-to-end tests for document intake through the background worker

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tokio::sync::Mutex;
use tower::ServiceExt;

use netscribe_server::config::Config;
use netscribe_server::notify::{
    notification_channel, BackgroundWorker, DocumentProcessor, ProcessError,
};
use netscribe_server::routes;
use netscribe_server::state::AppState;

#[derive(Default)]
struct RecordingProcessor {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl DocumentProcessor for RecordingProcessor {
    async fn process(&self, payload: &str) -> Result<(), ProcessError> {
        self.seen.lock().await.push(payload.to_string());
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_document_reaches_worker_once() {
    let mut config = Config::default();
    config.inventory.seed_servers = false;

    // Small queue so concurrent submissions exercise backpressure
    let (notifier, receiver) = notification_channel(4);
    let processor = Arc::new(RecordingProcessor::default());
    let worker = BackgroundWorker::new(receiver, processor.clone()).spawn();

    let state = AppState::new(config, notifier);
    let app = routes::router(state.clone());

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = Request::builder()
                    .method(Method::POST)
                    .uri("/documents")
                    .body(Body::from(format!(r#"{{"text":"doc-{}"}}"#, i)))
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let stats = worker.shutdown(Duration::from_secs(5)).await.unwrap();
    assert_eq!(stats.processed, 50);
    assert_eq!(stats.failed, 0);

    let mut seen = processor.seen.lock().await.clone();
    seen.sort();
    let mut expected: Vec<String> = (0..50).map(|i| format!("doc-{}", i)).collect();
    expected.sort();
    assert_eq!(seen, expected);

    let mut stored: Vec<String> = state
        .store()
        .list_documents()
        .await
        .into_iter()
        .map(|d| d.text)
        .collect();
    stored.sort();
    assert_eq!(stored, expected);
}
