//! Per-request context: a logging span and a store handle.
//!
//! [`attach`] runs ahead of every handler and stores a [`RequestContext`] in
//! the request extensions. Handlers take the context as an ordinary extractor
//! argument, so their dependencies are visible in their signatures.

use std::sync::Arc;

use axum::{
  extract::{FromRequestParts, Request, State},
  http::{HeaderName, HeaderValue, request::Parts},
  middleware::Next,
  response::Response,
};
use subrp_core::store::DocumentStore;
use tracing::{Instrument as _, Span};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Response header echoing the id the request was logged under.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Dependencies scoped to one request.
#[derive(Clone)]
pub struct RequestContext<S: DocumentStore> {
  pub request_id: Uuid,
  /// The request's logger; handlers log with `parent: &ctx.span`.
  pub span:       Span,
  pub store:      Arc<S>,
}

/// Middleware: build the [`RequestContext`], then run the rest of the stack
/// inside its span.
pub async fn attach<S>(
  State(state): State<AppState<S>>,
  mut req: Request,
  next: Next,
) -> Response
where
  S: DocumentStore + Clone + 'static,
{
  let request_id = Uuid::new_v4();
  let span = tracing::info_span!(
    "request",
    %request_id,
    method = %req.method(),
    path = %req.uri().path()
  );

  req.extensions_mut().insert(RequestContext {
    request_id,
    span: span.clone(),
    store: state.store.clone(),
  });

  let mut res = next.run(req).instrument(span).await;
  let mut buf = Uuid::encode_buffer();
  if let Ok(value) = HeaderValue::from_str(request_id.hyphenated().encode_lower(&mut buf)) {
    res.headers_mut().insert(REQUEST_ID_HEADER, value);
  }
  res
}

impl<S, St> FromRequestParts<St> for RequestContext<S>
where
  S: DocumentStore + Clone + 'static,
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<RequestContext<S>>()
      .cloned()
      .ok_or(ApiError::MissingContext)
  }
}
