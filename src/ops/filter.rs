use std::sync::Arc;

use crate::{
  observable::Observable, observer::Observer, subscriber::Emitter, subscription::Disposable,
};

impl<Item: 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Emit only those items from an observable that pass a predicate test.
  ///
  /// Errors and completion pass through unchanged. A panic in `predicate`
  /// unwinds out of the emitting call; use
  /// [`try_filter`](Observable::try_filter) for predicates that can fail.
  pub fn filter<F>(self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    let predicate = Arc::new(predicate);
    Observable::create(move |emitter, token| {
      let observer = FilterObserver { observer: emitter, predicate: predicate.clone() };
      self.actual_subscribe(observer, token.child());
      Ok(())
    })
  }

  /// Like [`filter`](Observable::filter), but the predicate may fail.
  ///
  /// The first `Err` terminates the stream with that error and disposes the
  /// upstream subscription.
  pub fn try_filter<F>(self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> Result<bool, Err> + Send + Sync + 'static,
  {
    let predicate = Arc::new(predicate);
    Observable::create(move |emitter, token| {
      let upstream = token.child();
      let observer = TryFilterObserver {
        observer: emitter,
        predicate: predicate.clone(),
        upstream: upstream.clone(),
      };
      self.actual_subscribe(observer, upstream);
      Ok(())
    })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: Arc<F>,
}

impl<Item, Err, F> Observer<Item, Err> for FilterObserver<Emitter<Item, Err>, F>
where
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value)
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }
}

pub struct TryFilterObserver<O, F> {
  observer: O,
  predicate: Arc<F>,
  upstream: Disposable,
}

impl<Item, Err, F> Observer<Item, Err> for TryFilterObserver<Emitter<Item, Err>, F>
where
  F: Fn(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.predicate)(&value) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(err) => {
        self.upstream.dispose();
        self.observer.error(err);
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }
}
