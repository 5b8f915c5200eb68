//! Request metrics.
//!
//! Emitted through the [`metrics`] facade; they cost nothing until the binary
//! installs a recorder.

use std::time::Instant;

use axum::{
  extract::{MatchedPath, Request},
  middleware::Next,
  response::Response,
};

pub const REQUESTS_TOTAL: &str = "frontend_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "frontend_request_duration_seconds";

/// Middleware: count every request and record its latency, labelled by
/// method, matched route and status.
pub async fn track(req: Request, next: Next) -> Response {
  let start = Instant::now();
  let method = req.method().to_string();
  let route = req
    .extensions()
    .get::<MatchedPath>()
    .map(|p| p.as_str().to_owned())
    .unwrap_or_else(|| "unmatched".to_owned());

  let res = next.run(req).await;

  let status = res.status().as_u16().to_string();
  metrics::counter!(
    REQUESTS_TOTAL,
    "method" => method.clone(),
    "route" => route.clone(),
    "status" => status
  )
  .increment(1);
  metrics::histogram!(
    REQUEST_DURATION_SECONDS,
    "method" => method,
    "route" => route
  )
  .record(start.elapsed().as_secs_f64());

  res
}
