//! HTTP front end for the subscription resource provider.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`]. TLS, auth and
//! the listener itself are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/healthz` | 200 when ready, 500 otherwise |
//! | `GET`  | `/subscriptions/{id}` | `?api-version` required |
//! | `PUT`  | `/subscriptions/{id}` | `?api-version` required; create-or-update |

pub mod context;
pub mod error;
pub mod health;
pub mod readiness;
pub mod subscriptions;
pub mod telemetry;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use subrp_core::store::DocumentStore;

pub use context::RequestContext;
pub use error::ApiError;
pub use readiness::Readiness;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the router.
#[derive(Clone)]
pub struct AppState<S: DocumentStore> {
  pub store:     Arc<S>,
  pub readiness: Readiness,
}

impl<S: DocumentStore> AppState<S> {
  /// State for `store` with the readiness gate initially closed.
  pub fn new(store: S) -> Self {
    Self {
      store:     Arc::new(store),
      readiness: Readiness::new(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the front-end [`Router`].
///
/// Every route runs behind [`context::attach`], so handlers can always
/// extract a [`RequestContext`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + Clone + 'static,
{
  Router::new()
    .route("/healthz", get(health::healthz::<S>))
    .route(
      "/subscriptions/{id}",
      get(subscriptions::get_one::<S>).put(subscriptions::put_one::<S>),
    )
    .layer(middleware::from_fn(telemetry::track))
    .layer(middleware::from_fn_with_state(
      state.clone(),
      context::attach::<S>,
    ))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
