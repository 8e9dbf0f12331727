use crate::observable::Observable;

impl<Item, Err> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
{
  /// Creates an observable that emits `value` once and completes.
  ///
  /// ```rust
  /// use rxflow::prelude::*;
  ///
  /// Observable::<_, ()>::of(42).subscribe_all(|v| assert_eq!(v, 42), |_| {}, || {});
  /// ```
  pub fn of(value: Item) -> Self {
    Observable::create(move |emitter, _| {
      emitter.next(value.clone());
      emitter.complete();
      Ok(())
    })
  }
}
