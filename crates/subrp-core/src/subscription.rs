//! Subscription payload — the unit exchanged over the API.
//!
//! Two shapes exist. [`SubscriptionBody`] is what arrives on the wire: every
//! field optional, `state` still a free-form string. [`Subscription`] is the
//! validated domain value; the only way to build one from a body is
//! [`crate::validate::validate`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Lifecycle state ─────────────────────────────────────────────────────────

/// The closed set of lifecycle states a subscription may hold.
///
/// Wire names are the variant names, case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionState {
  Registered,
  Unregistered,
  Warned,
  Suspended,
  Deleted,
}

impl SubscriptionState {
  pub const ALL: [SubscriptionState; 5] = [
    Self::Registered,
    Self::Unregistered,
    Self::Warned,
    Self::Suspended,
    Self::Deleted,
  ];

  /// The wire name, e.g. `"Registered"`.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Registered => "Registered",
      Self::Unregistered => "Unregistered",
      Self::Warned => "Warned",
      Self::Suspended => "Suspended",
      Self::Deleted => "Deleted",
    }
  }
}

impl fmt::Display for SubscriptionState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for SubscriptionState {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|state| state.as_str() == s)
      .ok_or_else(|| Error::UnknownState(s.to_owned()))
  }
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// A validated subscription payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
  pub state:             SubscriptionState,
  /// Opaque timestamp string; presence is checked, format is not.
  pub registration_date: String,
  /// Stored and returned verbatim.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub properties:        Option<serde_json::Value>,
}

impl Subscription {
  pub fn new(
    state: SubscriptionState,
    registration_date: impl Into<String>,
  ) -> Self {
    Self {
      state,
      registration_date: registration_date.into(),
      properties: None,
    }
  }

  pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
    self.properties = Some(properties);
    self
  }
}

/// A subscription payload as received on the wire, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBody {
  pub state:             Option<String>,
  pub registration_date: Option<String>,
  pub properties:        Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn state_parses_every_wire_name() {
    for state in SubscriptionState::ALL {
      assert_eq!(state.as_str().parse::<SubscriptionState>().unwrap(), state);
    }
  }

  #[test]
  fn state_rejects_unknown_and_wrong_case() {
    assert!(matches!(
      "Bogus".parse::<SubscriptionState>(),
      Err(Error::UnknownState(s)) if s == "Bogus"
    ));
    assert!("registered".parse::<SubscriptionState>().is_err());
    assert!("".parse::<SubscriptionState>().is_err());
  }

  #[test]
  fn subscription_serialises_camel_case_without_empty_properties() {
    let sub = Subscription::new(SubscriptionState::Warned, "2024-01-01");
    let json = serde_json::to_value(&sub).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "state": "Warned", "registrationDate": "2024-01-01" })
    );
  }

  #[test]
  fn body_accepts_missing_fields_and_arbitrary_state() {
    let body: SubscriptionBody =
      serde_json::from_str(r#"{"state":"Bogus","properties":{"a":[1,2]}}"#)
        .unwrap();
    assert_eq!(body.state.as_deref(), Some("Bogus"));
    assert!(body.registration_date.is_none());
    assert_eq!(body.properties, Some(serde_json::json!({ "a": [1, 2] })));
  }
}
