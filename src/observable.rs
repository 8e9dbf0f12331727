//! The `Observable` core: `create` and `subscribe`.
//!
//! An [`Observable`] is an immutable description of how to produce a
//! sequence. It wraps a producer function and does nothing until subscribed
//! (cold semantics); every `subscribe` runs the producer again, on the
//! calling thread, against a fresh guarded [`Emitter`].
//!
//! Operators live in [`crate::ops`], one file each, and extend `Observable`
//! with methods that return new observables closing over the upstream one.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
  observer::{Observer, ObserverAll},
  subscriber::Emitter,
  subscription::{CancellationToken, Disposable},
};

mod from_iter;
mod of;
mod trivial;

/// The function an observable runs for every subscription.
///
/// It receives the guarded emitter of the subscription and the cancellation
/// token it should poll if it loops. Returning `Err` terminates the
/// subscription with that error.
pub type Producer<Item, Err> =
  dyn Fn(Emitter<Item, Err>, CancellationToken) -> Result<(), Err> + Send + Sync;

/// A representation of any set of values over any amount of time.
///
/// Cloning is cheap and shares the producer.
pub struct Observable<Item, Err> {
  producer: Arc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { producer: self.producer.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates an observable from a producer function.
  ///
  /// The producer is stored, not called. Each subscription calls it with an
  /// [`Emitter`] to push `next`, `error` and `complete` into, and a
  /// [`CancellationToken`] that turns true once nobody listens any more.
  ///
  /// ```rust
  /// use rxflow::prelude::*;
  ///
  /// let numbers = Observable::<i32, String>::create(|emitter, token| {
  ///   for i in 0.. {
  ///     if token.is_cancelled() {
  ///       break;
  ///     }
  ///     emitter.next(i);
  ///     if i == 2 {
  ///       emitter.complete();
  ///     }
  ///   }
  ///   Ok(())
  /// });
  ///
  /// let seen = std::sync::Arc::new(std::sync::Mutex::new(vec![]));
  /// let c_seen = seen.clone();
  /// numbers.subscribe_all(move |v| c_seen.lock().unwrap().push(v), |_| {}, || {});
  /// assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
  /// ```
  pub fn create<F>(producer: F) -> Self
  where
    F: Fn(Emitter<Item, Err>, CancellationToken) -> Result<(), Err> + Send + Sync + 'static,
  {
    Observable { producer: Arc::new(producer) }
  }

  /// Runs the pipeline, delivering its events to `observer`.
  ///
  /// The producer runs synchronously on the calling thread, so this only
  /// returns once it does (wrap the observable in
  /// [`subscribe_on`](Observable::subscribe_on) to avoid that).
  pub fn subscribe<O>(self, observer: O) -> Disposable
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let disposable = Disposable::new();
    self.actual_subscribe(observer, disposable.clone());
    disposable
  }

  /// Like [`subscribe`](Observable::subscribe), with one closure per event
  /// kind.
  pub fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> Disposable
  where
    N: FnMut(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.subscribe(ObserverAll { next, error, complete })
  }

  /// Subscribes `observer` under an existing subscription handle.
  ///
  /// Operators call this with a child of their downstream token, so
  /// disposing the downstream also cancels the upstream.
  pub(crate) fn actual_subscribe<O>(&self, observer: O, disposable: Disposable)
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    trace!("subscribe");
    self.run(Emitter::new(observer, disposable));
  }

  /// Calls the producer with `emitter`, turning a returned error into the
  /// subscription's terminal error.
  pub(crate) fn run(&self, emitter: Emitter<Item, Err>) {
    let token = emitter.token();
    if let Err(err) = (self.producer)(emitter.clone(), token) {
      debug!("producer failed, terminating subscription with its error");
      emitter.error(err);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[derive(Debug, Clone, PartialEq)]
  enum Event {
    Next(i32),
    Error(&'static str),
    Complete,
  }

  fn record(source: Observable<i32, &'static str>) -> (Arc<Mutex<Vec<Event>>>, Disposable) {
    let events = Arc::new(Mutex::new(vec![]));
    let (n, e, c) = (events.clone(), events.clone(), events.clone());
    let disposable = source.subscribe_all(
      move |v| n.lock().unwrap().push(Event::Next(v)),
      move |err| e.lock().unwrap().push(Event::Error(err)),
      move || c.lock().unwrap().push(Event::Complete),
    );
    (events, disposable)
  }

  #[rxflow_macro::test]
  fn delivers_values_then_complete() {
    let (events, disposable) = record(Observable::create(|emitter, _| {
      emitter.next(5);
      emitter.next(10);
      emitter.complete();
      Ok(())
    }));

    assert_eq!(
      *events.lock().unwrap(),
      vec![Event::Next(5), Event::Next(10), Event::Complete]
    );
    assert!(disposable.is_disposed());
  }

  #[rxflow_macro::test]
  fn producer_failure_becomes_one_error() {
    let (events, _) = record(Observable::create(|emitter, _| {
      emitter.next(1);
      Err("TestError")
    }));

    assert_eq!(*events.lock().unwrap(), vec![Event::Next(1), Event::Error("TestError")]);
  }

  #[rxflow_macro::test]
  fn producer_failure_after_complete_is_dropped() {
    let (events, _) = record(Observable::create(|emitter, _| {
      emitter.complete();
      Err("too late")
    }));

    assert_eq!(*events.lock().unwrap(), vec![Event::Complete]);
  }

  #[rxflow_macro::test]
  fn error_and_complete_both_called() {
    let (events, _) = record(Observable::create(|emitter, _| {
      emitter.error("first");
      emitter.complete();
      emitter.next(3);
      Ok(())
    }));

    assert_eq!(*events.lock().unwrap(), vec![Event::Error("first")]);
  }

  #[rxflow_macro::test]
  fn cold_until_subscribed() {
    let calls = Arc::new(Mutex::new(0));
    let c_calls = calls.clone();
    let source = Observable::<i32, &'static str>::create(move |emitter, _| {
      *c_calls.lock().unwrap() += 1;
      emitter.complete();
      Ok(())
    });
    assert_eq!(*calls.lock().unwrap(), 0);

    source.clone().subscribe_all(|_| {}, |_| {}, || {});
    source.subscribe_all(|_| {}, |_| {}, || {});
    assert_eq!(*calls.lock().unwrap(), 2);
  }

  #[rxflow_macro::test]
  fn dispose_stops_delivery_but_not_the_producer() {
    // The producer hands its emitter out and keeps emitting after dispose.
    let slot = Arc::new(Mutex::new(None));
    let c_slot = slot.clone();
    let (events, disposable) = record(Observable::create(move |emitter, _| {
      emitter.next(1);
      *c_slot.lock().unwrap() = Some(emitter);
      Ok(())
    }));
    let emitter = slot.lock().unwrap().take().unwrap();

    emitter.next(2);
    disposable.dispose();
    emitter.next(3);
    emitter.error("ignored");
    emitter.complete();

    assert_eq!(*events.lock().unwrap(), vec![Event::Next(1), Event::Next(2)]);
    assert!(emitter.is_closed());
  }

  #[rxflow_macro::test(timeout_ms = 2000)]
  fn consumer_completes_the_stream_it_is_reading() {
    let slot = Arc::new(Mutex::new(None::<Emitter<i32, &'static str>>));
    let (c_slot, n_slot) = (slot.clone(), slot.clone());
    let events = Arc::new(Mutex::new(vec![]));
    let (n, c) = (events.clone(), events.clone());

    Observable::<i32, &'static str>::create(move |emitter, _| {
      *c_slot.lock().unwrap() = Some(emitter.clone());
      emitter.next(1);
      emitter.next(2);
      Ok(())
    })
    .subscribe_all(
      move |v| {
        n.lock().unwrap().push(Event::Next(v));
        let emitter = n_slot.lock().unwrap().clone();
        if let Some(emitter) = emitter {
          emitter.complete();
        }
      },
      |_| {},
      move || c.lock().unwrap().push(Event::Complete),
    );

    assert_eq!(*events.lock().unwrap(), vec![Event::Next(1), Event::Complete]);
  }

  #[rxflow_macro::test]
  fn dispose_is_permanent_and_idempotent() {
    let (events, disposable) = record(Observable::create(|_, _| Ok(())));
    disposable.dispose();
    disposable.dispose();
    assert!(disposable.is_disposed());
    assert!(events.lock().unwrap().is_empty());
  }

  #[rxflow_macro::test]
  fn token_observes_dispose() {
    let token_slot = Arc::new(Mutex::new(None));
    let c_slot = token_slot.clone();
    let disposable = Observable::<i32, &'static str>::create(move |_, token| {
      *c_slot.lock().unwrap() = Some(token);
      Ok(())
    })
    .subscribe_all(|_| {}, |_| {}, || {});

    let token = token_slot.lock().unwrap().take().unwrap();
    assert!(!token.is_cancelled());
    disposable.dispose();
    assert!(token.is_cancelled());
  }
}
