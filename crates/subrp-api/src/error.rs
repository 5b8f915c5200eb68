//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Error bodies follow the resource-provider convention:
//!
//! ```json
//! { "error": { "code": "...", "message": "...", "target": "...", "details": [...] } }
//! ```

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use subrp_core::validate::FieldError;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("the subscription id {0:?} is not a valid UUID")]
  InvalidSubscriptionId(String),

  #[error("missing required query parameter 'api-version'")]
  MissingApiVersion,

  #[error("the query string could not be parsed: {0}")]
  InvalidQuery(String),

  #[error("the request body could not be parsed: {0}")]
  InvalidBody(String),

  #[error("the request content failed validation ({} field error(s))", .0.len())]
  Validation(Vec<FieldError>),

  #[error("not found: {0}")]
  NotFound(String),

  /// The router did not attach a request context. Only reachable through
  /// a wiring mistake.
  #[error("request context missing")]
  MissingContext,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CloudError {
  error: CloudErrorBody,
}

#[derive(Debug, Serialize)]
struct CloudErrorBody {
  code:    &'static str,
  message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  target:  Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  details: Vec<CloudErrorBody>,
}

impl CloudErrorBody {
  fn new(code: &'static str, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
      target: None,
      details: Vec::new(),
    }
  }

  fn with_target(mut self, target: impl Into<String>) -> Self {
    self.target = Some(target.into());
    self
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    let (status, body) = match self {
      ApiError::InvalidSubscriptionId(_) => (
        StatusCode::BAD_REQUEST,
        CloudErrorBody::new("InvalidSubscriptionID", message)
          .with_target("subscriptionId"),
      ),
      ApiError::MissingApiVersion | ApiError::InvalidQuery(_) => (
        StatusCode::BAD_REQUEST,
        CloudErrorBody::new("InvalidParameter", message).with_target("api-version"),
      ),
      ApiError::InvalidBody(_) => (
        StatusCode::BAD_REQUEST,
        CloudErrorBody::new("InvalidRequestContent", message),
      ),
      ApiError::Validation(errors) => {
        let mut body = CloudErrorBody::new("InvalidRequestContent", message);
        body.details = errors
          .into_iter()
          .map(|e| {
            CloudErrorBody::new("InvalidRequestContent", e.message).with_target(e.target)
          })
          .collect();
        (StatusCode::BAD_REQUEST, body)
      }
      ApiError::NotFound(_) => {
        (StatusCode::NOT_FOUND, CloudErrorBody::new("NotFound", message))
      }
      ApiError::MissingContext | ApiError::Store(_) => {
        tracing::error!(error = %message, "request failed with internal error");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          CloudErrorBody::new("InternalServerError", "Internal server error."),
        )
      }
    };
    (status, Json(CloudError { error: body })).into_response()
  }
}
