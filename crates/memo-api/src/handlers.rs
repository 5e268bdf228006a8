//! HTTP handlers for the read pipeline.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use memo_core::{NoteFilter, NotesQuery, RawNotesQuery};

use crate::error::ApiError;
use crate::AppState;

/// GET /notes — list the caller's notes.
///
/// The pipeline runs linearly and suspends twice, once in the token
/// verifier and once in the store query. Any failure propagates to
/// [`ApiError`] and is classified exactly once.
pub async fn list_notes(
    State(state): State<AppState>,
    Query(raw): Query<RawNotesQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let query = NotesQuery::from_raw(&raw)?;

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let principal = state.verifier.verify(&query.user, bearer).await?;

    let filter = NoteFilter::for_request(&query, &principal);
    let notes = state.store.list_notes(&filter).await?;

    info!(
        op = "list_notes",
        uid = %principal.uid,
        result_count = notes.len(),
        "notes listed"
    );
    Ok(Json(notes))
}

/// GET /health — liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "memo-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
