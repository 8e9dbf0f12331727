use crate::observable::Observable;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates an observable that produces no values.
  ///
  /// Completes immediately. Never emits an error.
  pub fn empty() -> Self {
    Observable::create(|emitter, _| {
      emitter.complete();
      Ok(())
    })
  }
}

impl<Item, Err> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + Send + Sync + 'static,
{
  /// Creates an observable that emits no items, just terminates with an error.
  pub fn throw_err(err: Err) -> Self { Observable::create(move |_, _| Err(err.clone())) }
}
