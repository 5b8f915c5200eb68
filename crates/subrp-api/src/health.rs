//! Handler for `GET /healthz`.

use axum::{extract::State, http::StatusCode};
use subrp_core::store::DocumentStore;

use crate::AppState;

/// `GET /healthz` — 200 when the readiness gate is set, 500 otherwise.
/// No body either way.
pub async fn healthz<S>(State(state): State<AppState<S>>) -> StatusCode
where
  S: DocumentStore + Clone + 'static,
{
  if state.readiness.is_ready() {
    StatusCode::OK
  } else {
    StatusCode::INTERNAL_SERVER_ERROR
  }
}
