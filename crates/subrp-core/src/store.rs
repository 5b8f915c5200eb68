//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends ([`crate::cache::MemoryStore`],
//! `subrp-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{document::SubscriptionDocument, subscription::Subscription};

/// Abstraction over a subscription document store.
///
/// Implementations must be linearizable per key: operations on the same `id`
/// apply in a single total order and a reader never observes a document that
/// mixes fields from two writes. Operations on different ids must not block
/// one another for longer than a single map or row operation.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new document under `doc.id`.
  ///
  /// Returns an "already exists" error if a document with that id is
  /// present; the stored document is left untouched in that case.
  fn create(
    &self,
    doc: SubscriptionDocument,
  ) -> impl Future<Output = Result<SubscriptionDocument, Self::Error>> + Send + '_;

  /// Retrieve a document by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SubscriptionDocument>, Self::Error>>
  + Send
  + '_;

  /// Create-or-update: store `subscription` under `id`, replacing any prior
  /// payload in full, and return the stored document.
  fn put(
    &self,
    id: Uuid,
    subscription: Subscription,
  ) -> impl Future<Output = Result<SubscriptionDocument, Self::Error>> + Send + '_;
}
