use crate::observable::Observable;

impl<Item, Err> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  /// Creates an observable that produces values from an iterator.
  ///
  /// Completes when all elements have been emitted. Never emits an error.
  /// Stops early, without completing, once the subscription is cancelled.
  ///
  /// ```rust
  /// use rxflow::prelude::*;
  ///
  /// Observable::<_, ()>::from_iter(vec![0, 1, 2, 3])
  ///   .subscribe_all(|v| println!("{v},"), |_| {}, || {});
  /// ```
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + Send + Sync + 'static,
  {
    Observable::create(move |emitter, token| {
      for v in iter.clone() {
        if token.is_cancelled() {
          return Ok(());
        }
        emitter.next(v);
      }
      emitter.complete();
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  use crate::{observer::ObserverAll, prelude::*};

  #[rxflow_macro::test]
  fn emits_all_items_in_order() {
    let seen = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());

    Observable::<_, ()>::from_iter(1..=4).subscribe_all(
      move |v| c_seen.lock().unwrap().push(v),
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    assert!(*completed.lock().unwrap());
  }

  #[rxflow_macro::test]
  fn stops_pulling_once_cancelled() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let c_pulled = pulled.clone();
    let source = Observable::<_, ()>::from_iter((0..1000).inspect(move |_| {
      c_pulled.fetch_add(1, Ordering::SeqCst);
    }));

    let seen = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());
    let disposable = Disposable::new();
    let c_disposable = disposable.clone();
    source.actual_subscribe(
      ObserverAll {
        next: move |v: i32| {
          c_seen.lock().unwrap().push(v);
          if v == 2 {
            c_disposable.dispose();
          }
        },
        error: |_: ()| {},
        complete: move || *c_completed.lock().unwrap() = true,
      },
      disposable,
    );

    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    assert!(!*completed.lock().unwrap());
    // The item pulled right after dispose is the last one.
    assert_eq!(pulled.load(Ordering::SeqCst), 4);
  }
}
