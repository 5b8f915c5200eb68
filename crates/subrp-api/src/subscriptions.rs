//! Handlers for `/subscriptions/{id}`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subscriptions/{id}?api-version=` | 404 if not found |
//! | `PUT`  | `/subscriptions/{id}?api-version=` | Create-or-update; 200 either way |
//!
//! Checks run in a fixed order: the id, then `api-version`, then (for PUT) the
//! body, then validation. Nothing reaches the store until all of them pass.

use axum::{
  Json,
  body::Body,
  extract::{FromRequestParts, Path, Query},
  http::request::Parts,
};
use serde::Deserialize;
use subrp_core::{
  store::DocumentStore,
  subscription::{Subscription, SubscriptionBody},
  validate::validate,
};
use uuid::Uuid;

use crate::{context::RequestContext, error::ApiError};

// ─── Request parts ───────────────────────────────────────────────────────────

/// Largest PUT body read into memory.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// The query string of a subscription request.
///
/// Extraction failures (a repeated `api-version`, say) are reported as
/// [`ApiError::InvalidQuery`] so they carry the usual error body.
#[derive(Debug, Deserialize)]
pub struct ApiVersionParams {
  #[serde(rename = "api-version")]
  pub api_version: Option<String>,
}

impl ApiVersionParams {
  /// The requested API version. Its value is not interpreted, but it must be
  /// present and non-empty.
  pub fn require(&self) -> Result<&str, ApiError> {
    self
      .api_version
      .as_deref()
      .filter(|v| !v.is_empty())
      .ok_or(ApiError::MissingApiVersion)
  }
}

impl<St> FromRequestParts<St> for ApiVersionParams
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
    Query::<ApiVersionParams>::try_from_uri(&parts.uri)
      .map(|Query(params)| params)
      .map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
  }
}

/// Parse a subscription id from the URL path. Only the hyphenated textual
/// form is accepted, in either letter case.
pub fn parse_subscription_id(raw: &str) -> Result<Uuid, ApiError> {
  if raw.len() != 36 {
    return Err(ApiError::InvalidSubscriptionId(raw.to_owned()));
  }
  Uuid::try_parse(raw).map_err(|_| ApiError::InvalidSubscriptionId(raw.to_owned()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subscriptions/{id}?api-version=<v>`
pub async fn get_one<S>(
  ctx: RequestContext<S>,
  Path(raw_id): Path<String>,
  params: Result<ApiVersionParams, ApiError>,
) -> Result<Json<Subscription>, ApiError>
where
  S: DocumentStore + Clone + 'static,
{
  let id = parse_subscription_id(&raw_id)?;
  let api_version = params?.require()?.to_owned();

  let doc = ctx
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("subscription {id} not found")))?;

  tracing::debug!(parent: &ctx.span, %id, %api_version, "subscription read");
  Ok(Json(doc.subscription))
}

// ─── Create or update ─────────────────────────────────────────────────────────

/// `PUT /subscriptions/{id}?api-version=<v>` — body: [`SubscriptionBody`].
///
/// Returns 200 and the stored payload whether or not a document existed.
pub async fn put_one<S>(
  ctx: RequestContext<S>,
  Path(raw_id): Path<String>,
  params: Result<ApiVersionParams, ApiError>,
  body: Body,
) -> Result<Json<Subscription>, ApiError>
where
  S: DocumentStore + Clone + 'static,
{
  let id = parse_subscription_id(&raw_id)?;
  let api_version = params?.require()?.to_owned();

  // Read only after the id and api-version pass, so an oversized body never
  // masks an earlier error.
  let body = axum::body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|_| {
    ApiError::InvalidBody(format!("request body exceeds {MAX_BODY_BYTES} bytes"))
  })?;
  let body: SubscriptionBody = serde_json::from_slice(&body)
    .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

  let subscription = validate(&body).map_err(|errors| {
    tracing::info!(
      parent: &ctx.span,
      %id,
      errors = errors.len(),
      "rejected invalid subscription"
    );
    ApiError::Validation(errors)
  })?;

  let doc = ctx
    .store
    .put(id, subscription)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    parent: &ctx.span,
    %id,
    %api_version,
    state = %doc.subscription.state,
    "subscription stored"
  );
  Ok(Json(doc.subscription))
}
