//! [`MemoryStore`] — an in-process [`DocumentStore`].
//!
//! Documents live in a sharded concurrent map. Every operation is a single
//! shard-locked map operation, which gives per-key linearizability: two
//! writers to the same id are serialised by the shard lock and a value is
//! always replaced whole. Ids hashing to different shards never contend.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use crate::{
  Error, Result, document::SubscriptionDocument, store::DocumentStore,
  subscription::Subscription,
};

/// A [`DocumentStore`] that keeps everything in memory.
///
/// Cloning is cheap — clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  docs: Arc<DashMap<Uuid, SubscriptionDocument>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of stored documents.
  pub fn len(&self) -> usize { self.docs.len() }

  pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

impl DocumentStore for MemoryStore {
  type Error = Error;

  async fn create(&self, doc: SubscriptionDocument) -> Result<SubscriptionDocument> {
    match self.docs.entry(doc.id()) {
      Entry::Occupied(_) => Err(Error::DocumentExists(doc.id())),
      Entry::Vacant(slot) => {
        slot.insert(doc.clone());
        Ok(doc)
      }
    }
  }

  async fn get(&self, id: Uuid) -> Result<Option<SubscriptionDocument>> {
    Ok(self.docs.get(&id).map(|doc| doc.value().clone()))
  }

  async fn put(
    &self,
    id: Uuid,
    subscription: Subscription,
  ) -> Result<SubscriptionDocument> {
    let doc = SubscriptionDocument::new(id, subscription);
    self.docs.insert(id, doc.clone());
    Ok(doc)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::subscription::SubscriptionState;

  fn sub(state: SubscriptionState) -> Subscription {
    Subscription::new(state, "2024-01-01T00:00:00Z")
  }

  #[tokio::test]
  async fn get_missing_returns_none() {
    let store = MemoryStore::new();
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn create_then_get() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    let doc = SubscriptionDocument::new(id, sub(SubscriptionState::Registered));

    store.create(doc.clone()).await.unwrap();
    assert_eq!(store.get(id).await.unwrap(), Some(doc));
  }

  #[tokio::test]
  async fn create_twice_reports_already_exists() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();

    store
      .create(SubscriptionDocument::new(id, sub(SubscriptionState::Registered)))
      .await
      .unwrap();
    let err = store
      .create(SubscriptionDocument::new(id, sub(SubscriptionState::Suspended)))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::DocumentExists(e) if e == id));

    // The original document survives.
    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.subscription.state, SubscriptionState::Registered);
  }

  #[tokio::test]
  async fn put_creates_then_replaces_in_place() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();

    let first = store
      .put(
        id,
        sub(SubscriptionState::Registered).with_properties(json!({ "a": 1 })),
      )
      .await
      .unwrap();
    assert_eq!(first.id(), id);

    let second = store.put(id, sub(SubscriptionState::Warned)).await.unwrap();
    assert_eq!(second.id(), id);
    assert_eq!(store.len(), 1);

    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.subscription.state, SubscriptionState::Warned);
    assert!(stored.subscription.properties.is_none());
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_puts_leave_exactly_one_whole_payload() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();

    let candidates: Vec<Subscription> = (0..32)
      .map(|i| {
        Subscription::new(SubscriptionState::ALL[i % 5], format!("date-{i}"))
          .with_properties(json!({ "writer": i }))
      })
      .collect();

    let mut handles = Vec::new();
    for candidate in candidates.clone() {
      let store = store.clone();
      handles.push(tokio::spawn(async move { store.put(id, candidate).await }));
    }
    for handle in handles {
      handle.await.unwrap().unwrap();
    }

    let stored = store.get(id).await.unwrap().unwrap();
    assert!(candidates.contains(&stored.subscription));
    assert_eq!(store.get(id).await.unwrap().unwrap(), stored);
    assert_eq!(store.len(), 1);
  }
}
