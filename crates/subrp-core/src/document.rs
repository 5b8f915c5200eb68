//! Persisted document envelopes.

use serde::Serialize;
use uuid::Uuid;

use crate::subscription::Subscription;

/// The envelope common to every persisted entity.
///
/// `id` is unique within its collection and never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseDocument {
  pub id: Uuid,
}

/// A subscription as held by a [`crate::store::DocumentStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionDocument {
  #[serde(flatten)]
  pub base:         BaseDocument,
  pub subscription: Subscription,
}

impl SubscriptionDocument {
  pub fn new(id: Uuid, subscription: Subscription) -> Self {
    Self {
      base: BaseDocument { id },
      subscription,
    }
  }

  pub fn id(&self) -> Uuid { self.base.id }
}
