//! Error type for `subrp-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] subrp_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),
}

impl Error {
  /// Whether this error is the store's "already exists" signal.
  pub fn is_already_exists(&self) -> bool {
    matches!(self, Error::Core(subrp_core::Error::DocumentExists(_)))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
