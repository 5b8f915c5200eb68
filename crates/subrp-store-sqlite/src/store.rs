//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use subrp_core::{
  document::SubscriptionDocument, store::DocumentStore,
  subscription::Subscription,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawDocument, encode_properties, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A subscription document store backed by a single SQLite file.
///
/// Every call runs on the one connection thread owned by
/// [`tokio_rusqlite::Connection`], and each operation is a single SQL
/// statement, so operations on the same id are linearizable.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Column values for one document, ready to bind.
struct Params {
  id:                String,
  state:             &'static str,
  registration_date: String,
  properties_json:   Option<String>,
}

impl Params {
  fn encode(id: Uuid, subscription: &Subscription) -> Result<Self> {
    Ok(Params {
      id:                encode_uuid(id),
      state:             subscription.state.as_str(),
      registration_date: subscription.registration_date.clone(),
      properties_json:   encode_properties(subscription.properties.as_ref())?,
    })
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  async fn create(&self, doc: SubscriptionDocument) -> Result<SubscriptionDocument> {
    let p = Params::encode(doc.id(), &doc.subscription)?;

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT OR IGNORE INTO subscriptions
             (id, state, registration_date, properties_json)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![p.id, p.state, p.registration_date, p.properties_json],
        )?;
        Ok(n == 1)
      })
      .await?;

    if !inserted {
      return Err(subrp_core::Error::DocumentExists(doc.id()).into());
    }
    tracing::debug!(id = %doc.id(), "created subscription document");
    Ok(doc)
  }

  async fn get(&self, id: Uuid) -> Result<Option<SubscriptionDocument>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, state, registration_date, properties_json
               FROM subscriptions WHERE id = ?1",
              rusqlite::params![id_str],
              RawDocument::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn put(
    &self,
    id: Uuid,
    subscription: Subscription,
  ) -> Result<SubscriptionDocument> {
    let p = Params::encode(id, &subscription)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subscriptions
             (id, state, registration_date, properties_json)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(id) DO UPDATE SET
             state             = excluded.state,
             registration_date = excluded.registration_date,
             properties_json   = excluded.properties_json",
          rusqlite::params![p.id, p.state, p.registration_date, p.properties_json],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%id, state = %subscription.state, "stored subscription document");
    Ok(SubscriptionDocument::new(id, subscription))
  }
}
