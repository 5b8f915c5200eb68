//! Validation of incoming subscription payloads.
//!
//! Every rule is checked independently so a caller sees all of the problems
//! with a payload at once, not just the first.

use serde::Serialize;

use crate::subscription::{Subscription, SubscriptionBody, SubscriptionState};

/// One failed rule, attributed to the offending field by its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub target:  &'static str,
  pub message: String,
}

impl FieldError {
  fn new(target: &'static str, message: impl Into<String>) -> Self {
    Self {
      target,
      message: message.into(),
    }
  }
}

/// Check `body` against the subscription rules and, if it passes, convert it
/// into a [`Subscription`].
///
/// No I/O happens here. On failure the returned list is never empty.
pub fn validate(body: &SubscriptionBody) -> Result<Subscription, Vec<FieldError>> {
  let mut errors = Vec::new();

  let state = match body.state.as_deref() {
    None => {
      errors.push(FieldError::new("state", "missing required field 'state'"));
      None
    }
    Some(raw) => match raw.parse::<SubscriptionState>() {
      Ok(state) => Some(state),
      Err(_) => {
        let allowed: Vec<&str> =
          SubscriptionState::ALL.iter().map(|s| s.as_str()).collect();
        errors.push(FieldError::new(
          "state",
          format!(
            "invalid value {raw:?} for field 'state' (must be one of: {})",
            allowed.join(", ")
          ),
        ));
        None
      }
    },
  };

  let registration_date = match body.registration_date.as_deref() {
    Some(date) if !date.is_empty() => Some(date),
    _ => {
      errors.push(FieldError::new(
        "registrationDate",
        "missing required field 'registrationDate'",
      ));
      None
    }
  };

  match (state, registration_date) {
    (Some(state), Some(date)) if errors.is_empty() => Ok(Subscription {
      state,
      registration_date: date.to_owned(),
      properties: body.properties.clone(),
    }),
    _ => Err(errors),
  }
}
