//! Route modules for Netscribe Server

pub mod documents;
pub mod health;
pub mod servers;

use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(servers::router())
        .merge(documents::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decode a JSON object request body regardless of its declared content type.
///
/// Arrays, scalars and `null` are rejected even where the target struct's
/// derived `Deserialize` would accept a sequence.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    match serde_json::from_slice::<Value>(body)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(AppError::BadRequest("expected a JSON object".to_string())),
    }
}

pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
