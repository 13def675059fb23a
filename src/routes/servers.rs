//! Server inventory endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::{decode_body, method_not_allowed};
use crate::error::Result;
use crate::inventory::Server;
use crate::state::AppState;

/// Create the servers router
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/servers",
        get(list_servers)
            .post(create_server)
            .fallback(method_not_allowed),
    )
}

/// List all servers
async fn list_servers(State(state): State<AppState>) -> Json<Vec<Server>> {
    Json(state.store().list_servers().await)
}

/// Register a new server
async fn create_server(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Server>)> {
    let server: Server = decode_body(&body)?;

    state.store().add_server(server.clone()).await;
    tracing::info!(ip_address = %server.ip_address, "New server added: {}", server.status_line());

    Ok((StatusCode::CREATED, Json(server)))
}
