//! The readiness gate behind `GET /healthz`.

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

/// A shared ready/not-ready flag.
///
/// Starts out not ready. The process that owns the listener flips it once it
/// can serve traffic and back again when shutdown begins; every clone
/// observes the change on its next read.
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
  pub fn new() -> Self { Self::default() }

  pub fn set(&self, ready: bool) { self.0.store(ready, Ordering::SeqCst); }

  pub fn is_ready(&self) -> bool { self.0.load(Ordering::SeqCst) }
}
