//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, states by wire name and
//! properties as compact JSON.

use subrp_core::{
  document::SubscriptionDocument,
  subscription::{Subscription, SubscriptionState},
};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Properties ──────────────────────────────────────────────────────────────

pub fn encode_properties(p: Option<&serde_json::Value>) -> Result<Option<String>> {
  Ok(p.map(serde_json::to_string).transpose()?)
}

pub fn decode_properties(s: Option<&str>) -> Result<Option<serde_json::Value>> {
  Ok(s.map(serde_json::from_str).transpose()?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `subscriptions` row.
pub struct RawDocument {
  pub id:                String,
  pub state:             String,
  pub registration_date: String,
  pub properties_json:   Option<String>,
}

impl RawDocument {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawDocument {
      id:                row.get(0)?,
      state:             row.get(1)?,
      registration_date: row.get(2)?,
      properties_json:   row.get(3)?,
    })
  }

  /// Decode the row. A `state` column outside the known set is an error,
  /// never a partially-built document.
  pub fn into_document(self) -> Result<SubscriptionDocument> {
    let id = decode_uuid(&self.id)?;
    let state: SubscriptionState = self.state.parse()?;
    let properties = decode_properties(self.properties_json.as_deref())?;

    Ok(SubscriptionDocument::new(id, Subscription {
      state,
      registration_date: self.registration_date,
      properties,
    }))
  }
}
