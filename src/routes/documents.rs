//! Document intake endpoints
//!
//! Stored documents are forwarded to the background worker after the
//! append; the response does not wait for processing.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::{decode_body, method_not_allowed};
use crate::error::Result;
use crate::inventory::Document;
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/documents",
        get(list_documents)
            .post(create_document)
            .fallback(method_not_allowed),
    )
}

/// List all documents
async fn list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    Json(state.store().list_documents().await)
}

/// Store a document and queue it for processing
async fn create_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Document>)> {
    let document: Document = decode_body(&body)?;

    state.store().add_document(document.clone()).await;
    tracing::info!(length = document.text.len(), "New document added");

    Ok((StatusCode::CREATED, Json(document)))
}
