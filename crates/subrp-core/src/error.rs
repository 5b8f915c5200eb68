//! Error types for `subrp-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("document already exists: {0}")]
  DocumentExists(Uuid),

  #[error("unknown subscription state: {0:?}")]
  UnknownState(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
