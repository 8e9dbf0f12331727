use std::sync::Arc;

use smallvec::SmallVec;

use crate::{
  observable::Observable, observer::Observer, subscriber::Emitter,
  subscription::CancellationToken,
};

impl<Item: 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Maps every item to an inner observable and emits the inner values.
  ///
  /// Each inner observable is subscribed to immediately, on the thread that
  /// delivered the outer item. Its values are held back until it completes
  /// and then emitted together, in arrival order, so the output is grouped
  /// per outer item in outer order.
  ///
  /// An inner error is forwarded downstream at once and the values buffered
  /// for that item are dropped. The outer stream is not stopped by it: later
  /// outer items are still mapped and subscribed, but since the downstream
  /// has already terminated their output goes nowhere.
  ///
  /// Outer completion completes the downstream straight away, even if an
  /// inner observable running on another scheduler has not finished yet.
  ///
  /// ```rust
  /// use rxflow::prelude::*;
  ///
  /// let out = std::sync::Arc::new(std::sync::Mutex::new(vec![]));
  /// let c_out = out.clone();
  /// Observable::<_, ()>::from_iter(["A", "B"])
  ///   .flat_map(|s| Observable::from_iter([format!("{s}1"), format!("{s}2")]))
  ///   .subscribe_all(move |v| c_out.lock().unwrap().push(v), |_| {}, || {});
  /// assert_eq!(*out.lock().unwrap(), vec!["A1", "A2", "B1", "B2"]);
  /// ```
  pub fn flat_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: Send + 'static,
    F: Fn(Item) -> Observable<B, Err> + Send + Sync + 'static,
  {
    let func = Arc::new(f);
    Observable::create(move |emitter, token| {
      let observer = FlatMapObserver { observer: emitter, func: func.clone(), token: token.clone() };
      self.actual_subscribe(observer, token.child());
      Ok(())
    })
  }
}

pub struct FlatMapObserver<O, F> {
  observer: O,
  func: Arc<F>,
  /// Token of the downstream subscription; inner subscriptions hang off it.
  token: CancellationToken,
}

impl<Item, B, Err, F> Observer<Item, Err> for FlatMapObserver<Emitter<B, Err>, F>
where
  B: Send + 'static,
  Err: Send + 'static,
  F: Fn(Item) -> Observable<B, Err>,
{
  fn next(&mut self, value: Item) {
    let inner = (self.func)(value);
    let observer = BufferedInnerObserver { observer: self.observer.clone(), buffer: SmallVec::new() };
    inner.actual_subscribe(observer, self.token.child());
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }
}

/// Collects one inner observable's values and releases them on completion.
pub struct BufferedInnerObserver<B, Err> {
  observer: Emitter<B, Err>,
  buffer: SmallVec<[B; 4]>,
}

impl<B, Err> Observer<B, Err> for BufferedInnerObserver<B, Err> {
  fn next(&mut self, value: B) { self.buffer.push(value) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    for value in self.buffer {
      self.observer.next(value);
    }
  }
}
