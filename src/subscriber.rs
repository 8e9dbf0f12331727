use tracing::trace;

use crate::{
  observer::{BoxedObserver, Observer},
  rc::MutArc,
  subscription::{CancellationToken, Disposable},
};

enum Terminal<Err> {
  Error(Err),
  Complete,
}

/// The guarded observer a producer emits into.
///
/// Every subscription wraps the observer it was given in an `Emitter`. The
/// emitter enforces the stream grammar regardless of how the producer
/// behaves or how many threads it emits from:
///
/// - `next` is dropped once the subscription is disposed or terminated;
/// - only the first of `error`/`complete` is delivered, and it closes the
///   subscription (a test-and-set on the shared [`Disposable`] flag);
/// - delivery to the wrapped observer is serialised, so a `next` racing a
///   terminal event on another thread is either delivered before it or not
///   at all.
///
/// A terminal event raised while a `next` is being delivered, on any thread
/// and including from inside the observer's own `next`, is parked and handed
/// to the observer as soon as that delivery returns. A `next` raised from
/// inside the observer's own `next` on the same thread is not supported and
/// blocks.
///
/// Emitters are cheap to clone and, when `Err: Send`, can be moved to other
/// threads; all clones feed the same subscription.
pub struct Emitter<Item, Err> {
  observer: MutArc<Option<BoxedObserver<Item, Err>>>,
  /// Terminal event waiting for the in-flight delivery to release `observer`.
  pending: MutArc<Option<Terminal<Err>>>,
  disposable: Disposable,
}

impl<Item, Err> Emitter<Item, Err> {
  pub(crate) fn new<O>(observer: O, disposable: Disposable) -> Self
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let observer: BoxedObserver<Item, Err> = Box::new(observer);
    Emitter {
      observer: MutArc::own(Some(observer)),
      pending: MutArc::own(None),
      disposable,
    }
  }

  /// Forward a value, unless the subscription is already closed.
  pub fn next(&self, value: Item) {
    {
      let mut observer = self.observer.rc_deref_mut();
      if self.disposable.is_disposed() {
        trace!("value dropped, subscription closed");
      } else if let Some(observer) = observer.as_mut() {
        observer.box_next(value);
      }
    }
    self.deliver_pending();
  }

  /// Terminate the subscription with an error. Ignored if the subscription
  /// is already closed.
  pub fn error(&self, err: Err) {
    if !self.disposable.try_close() {
      trace!("error dropped, subscription closed");
      return;
    }
    self.terminate(Terminal::Error(err));
  }

  /// Terminate the subscription successfully. Ignored if the subscription
  /// is already closed.
  pub fn complete(&self) {
    if !self.disposable.try_close() {
      trace!("complete dropped, subscription closed");
      return;
    }
    self.terminate(Terminal::Complete);
  }

  /// True once nothing emitted here will reach the observer any more.
  #[inline]
  pub fn is_closed(&self) -> bool { self.disposable.is_disposed() }

  /// The cancellation signal of the subscription this emitter feeds.
  pub fn token(&self) -> CancellationToken { self.disposable.token() }

  fn terminate(&self, terminal: Terminal<Err>) {
    *self.pending.rc_deref_mut() = Some(terminal);
    self.deliver_pending();
  }

  /// Hands a parked terminal event to the observer, unless a delivery is in
  /// flight. Whoever holds the observer lock calls this again after releasing
  /// it, so a parked event is never left behind.
  fn deliver_pending(&self) {
    loop {
      if self.pending.rc_deref_mut().is_none() {
        return;
      }
      let Some(mut slot) = self.observer.try_rc_deref_mut() else {
        trace!("terminal event deferred until the current delivery returns");
        return;
      };
      let Some(terminal) = self.pending.rc_deref_mut().take() else {
        // Taken by a concurrent call; look again now the lock is released.
        drop(slot);
        continue;
      };
      let observer = slot.take();
      drop(slot);
      match (terminal, observer) {
        (Terminal::Error(err), Some(observer)) => observer.box_error(err),
        (Terminal::Complete, Some(observer)) => observer.box_complete(),
        (_, None) => {}
      }
      return;
    }
  }
}

impl<Item, Err> Clone for Emitter<Item, Err> {
  fn clone(&self) -> Self {
    Emitter {
      observer: self.observer.clone(),
      pending: self.pending.clone(),
      disposable: self.disposable.clone(),
    }
  }
}
