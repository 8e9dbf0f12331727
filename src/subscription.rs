//! Cancellation handles.
//!
//! Every subscription owns one [`Disposable`]. The caller of `subscribe`
//! keeps it to cancel the subscription, and the guarded observer handed to
//! the producer reads it before forwarding each event. Producers receive a
//! read-only [`CancellationToken`] view of the same flag so long-running
//! loops can stop doing work once nobody is listening.
//!
//! Operators subscribe to their upstream with a *child* disposable. An
//! explicit `dispose()` on a parent is visible to all of its descendants,
//! while a parent's terminal event is not, so an upstream keeps running after
//! its downstream has seen an error unless someone disposes the chain.

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use tracing::debug;

struct Inner {
  /// Set by a terminal event or by `dispose`. Never reset.
  closed: AtomicBool,
  /// Set only by `dispose`; this is what children observe.
  disposed: AtomicBool,
  parent: Option<Arc<Inner>>,
}

impl Inner {
  fn root() -> Self {
    Inner {
      closed: AtomicBool::new(false),
      disposed: AtomicBool::new(false),
      parent: None,
    }
  }

  fn is_disposed(&self) -> bool {
    self.disposed.load(Ordering::Acquire)
      || self.parent.as_ref().is_some_and(|p| p.is_disposed())
  }

  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) || self.is_disposed() }
}

/// Cancellation handle for one subscription.
///
/// Cloning yields another handle to the same flag.
#[derive(Clone)]
pub struct Disposable(Arc<Inner>);

impl Disposable {
  pub(crate) fn new() -> Self { Disposable(Arc::new(Inner::root())) }

  /// Cancel the subscription. Calling it again has no further effect.
  ///
  /// Cancellation is cooperative: events are no longer delivered, but a
  /// producer keeps running until it checks its [`CancellationToken`].
  pub fn dispose(&self) {
    self.0.disposed.store(true, Ordering::Release);
    if !self.0.closed.swap(true, Ordering::AcqRel) {
      debug!("subscription disposed");
    }
  }

  /// True once the subscription was disposed, delivered its terminal event,
  /// or one of the subscriptions it serves was disposed.
  pub fn is_disposed(&self) -> bool { self.0.is_closed() }

  /// A read-only view of this handle for producers.
  pub fn token(&self) -> CancellationToken { CancellationToken(self.0.clone()) }

  /// Mark the subscription terminated. Returns `true` for exactly one caller
  /// across `try_close` and `dispose`, and never after an ancestor was
  /// disposed.
  pub(crate) fn try_close(&self) -> bool {
    !self.0.is_disposed() && !self.0.closed.swap(true, Ordering::AcqRel)
  }
}

impl Debug for Disposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Disposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// Read-only cancellation signal passed to every producer.
#[derive(Clone)]
pub struct CancellationToken(Arc<Inner>);

impl CancellationToken {
  /// True once the subscription this token belongs to no longer accepts
  /// events.
  pub fn is_cancelled(&self) -> bool { self.0.is_closed() }

  /// A new subscription handle that is disposed whenever this token's
  /// subscription is explicitly disposed.
  pub(crate) fn child(&self) -> Disposable {
    Disposable(Arc::new(Inner {
      parent: Some(self.0.clone()),
      ..Inner::root()
    }))
  }
}

impl Debug for CancellationToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CancellationToken")
      .field("is_cancelled", &self.is_cancelled())
      .finish()
  }
}
