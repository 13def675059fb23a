//! Process lifecycle: bootstrap, signal handling and bounded shutdown

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::notify::{notification_channel, BackgroundWorker, LoggingProcessor};
use crate::routes;
use crate::state::AppState;

/// Run the server until a shutdown signal arrives
pub async fn run(config: Config) -> anyhow::Result<()> {
    let (notifier, receiver) = notification_channel(config.notifications.queue_capacity);
    let worker = BackgroundWorker::new(receiver, Arc::new(LoggingProcessor)).spawn();

    let state = AppState::new(config, notifier);
    tracing::info!(
        servers = state.store().server_count().await,
        queue_capacity = state.config().notifications.queue_capacity,
        "Inventory initialized"
    );

    let addr = format!("{}:{}", state.config().server.host, state.config().server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Netscribe Server listening on {}", addr);

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let grace = state.config().shutdown.grace_period();
    let drain = state.config().shutdown.worker_drain();
    let result = serve(listener, routes::router(state), shutdown, grace).await;

    match worker.shutdown(drain).await {
        Some(stats) => tracing::info!(
            processed = stats.processed,
            failed = stats.failed,
            "Background worker drained"
        ),
        None => tracing::warn!("Background worker stopped without draining"),
    }

    result
}

/// Serve `app` until `shutdown` is cancelled.
///
/// After cancellation no new connections are accepted and in-flight requests
/// get `grace` to finish before the server is dropped.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> anyhow::Result<()> {
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { server.await });

    let deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        joined = &mut server => {
            joined.context("server task failed")?.context("server error")?;
            tracing::info!("Server shutdown complete");
        }
        _ = deadline => {
            tracing::warn!(
                grace_ms = grace.as_millis() as u64,
                "In-flight requests did not finish within the grace period"
            );
            server.abort();
        }
    }

    Ok(())
}

/// Cancel `token` on Ctrl+C or SIGTERM
pub async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    token.cancel();
}
