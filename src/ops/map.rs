use std::sync::Arc;

use crate::{
  observable::Observable, observer::Observer, subscriber::Emitter, subscription::Disposable,
};

impl<Item: 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  ///
  /// Errors and completion pass through unchanged. A panic in `f` is not
  /// turned into an error; it unwinds out of the emitting call. Use
  /// [`try_map`](Observable::try_map) for transforms that can fail.
  pub fn map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> B + Send + Sync + 'static,
  {
    let func = Arc::new(f);
    Observable::create(move |emitter, token| {
      self.actual_subscribe(MapObserver { observer: emitter, func: func.clone() }, token.child());
      Ok(())
    })
  }

  /// Like [`map`](Observable::map), but `f` may fail.
  ///
  /// The first `Err` returned by `f` terminates the stream with that error
  /// and disposes the upstream subscription.
  pub fn try_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Result<B, Err> + Send + Sync + 'static,
  {
    let func = Arc::new(f);
    Observable::create(move |emitter, token| {
      let upstream = token.child();
      let observer = TryMapObserver {
        observer: emitter,
        func: func.clone(),
        upstream: upstream.clone(),
      };
      self.actual_subscribe(observer, upstream);
      Ok(())
    })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  func: Arc<F>,
}

impl<Item, B, Err, F> Observer<Item, Err> for MapObserver<Emitter<B, Err>, F>
where
  F: Fn(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }
}

pub struct TryMapObserver<O, F> {
  observer: O,
  func: Arc<F>,
  upstream: Disposable,
}

impl<Item, B, Err, F> Observer<Item, Err> for TryMapObserver<Emitter<B, Err>, F>
where
  F: Fn(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.func)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => {
        self.upstream.dispose();
        self.observer.error(err);
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  use crate::prelude::*;

  fn collect<Item: Send + 'static, Err: Send + 'static>(
    source: Observable<Item, Err>,
  ) -> (Arc<Mutex<Vec<Item>>>, Arc<Mutex<Option<Err>>>, Arc<Mutex<bool>>) {
    let values = Arc::new(Mutex::new(vec![]));
    let error = Arc::new(Mutex::new(None));
    let completed = Arc::new(Mutex::new(false));
    let (v, e, c) = (values.clone(), error.clone(), completed.clone());
    source.subscribe_all(
      move |x| v.lock().unwrap().push(x),
      move |err| *e.lock().unwrap() = Some(err),
      move || *c.lock().unwrap() = true,
    );
    (values, error, completed)
  }

  #[rxflow_macro::test]
  fn primitive_type() {
    let (values, _, completed) = collect(Observable::<_, ()>::from_iter(100..101).map(|v| v * 2));
    assert_eq!(*values.lock().unwrap(), vec![200]);
    assert!(*completed.lock().unwrap());
  }

  #[rxflow_macro::test]
  fn map_types_mixed() {
    let (values, _, _) =
      collect(Observable::<_, ()>::from_iter(vec!['a', 'b', 'c']).map(|c| c.to_string()));
    assert_eq!(*values.lock().unwrap(), vec!["a", "b", "c"]);
  }

  #[rxflow_macro::test]
  fn error_passes_through() {
    let source = Observable::<i32, &'static str>::create(|emitter, _| {
      emitter.next(1);
      Err("upstream")
    });
    let (values, error, completed) = collect(source.map(|v| v + 1));
    assert_eq!(*values.lock().unwrap(), vec![2]);
    assert_eq!(*error.lock().unwrap(), Some("upstream"));
    assert!(!*completed.lock().unwrap());
  }

  #[rxflow_macro::test]
  #[should_panic(expected = "transform failed")]
  fn panicking_transform_unwinds() {
    Observable::<i32, ()>::of(1)
      .map(|_: i32| -> i32 { panic!("transform failed") })
      .subscribe_all(|_| {}, |_| {}, || {});
  }

  #[rxflow_macro::test]
  fn try_map_turns_failure_into_error() {
    let source = Observable::<i32, String>::from_iter(1..=5);
    let (values, error, completed) = collect(source.try_map(|v| {
      if v == 3 {
        Err(format!("bad {v}"))
      } else {
        Ok(v * 10)
      }
    }));
    assert_eq!(*values.lock().unwrap(), vec![10, 20]);
    assert_eq!(error.lock().unwrap().as_deref(), Some("bad 3"));
    assert!(!*completed.lock().unwrap());
  }

  #[rxflow_macro::test]
  fn try_map_failure_stops_upstream() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let c_pulled = pulled.clone();
    let source = Observable::<_, &'static str>::from_iter((0..1000).inspect(move |_| {
      c_pulled.fetch_add(1, Ordering::SeqCst);
    }));

    let (values, error, _) =
      collect(source.try_map(|v| if v < 2 { Ok(v) } else { Err("stop") }));

    assert_eq!(*values.lock().unwrap(), vec![0, 1]);
    assert_eq!(*error.lock().unwrap(), Some("stop"));
    // Item 2 failed, item 3 was pulled before the loop saw the cancellation.
    assert_eq!(pulled.load(Ordering::SeqCst), 4);
  }
}
