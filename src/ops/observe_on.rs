use crate::{
  observable::Observable, observer::Observer, scheduler::Scheduler, subscriber::Emitter,
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Delivers every event of this observable on `scheduler`.
  ///
  /// The upstream is subscribed on the current thread; each `next`, `error`
  /// and `complete` it produces is submitted to `scheduler` as its own task.
  /// Relative order of those events is kept only if the scheduler runs tasks
  /// in submission order, as [`SingleThreadScheduler`] does.
  ///
  /// [`SingleThreadScheduler`]: crate::scheduler::SingleThreadScheduler
  pub fn observe_on<S>(self, scheduler: S) -> Observable<Item, Err>
  where
    S: Scheduler + Clone + Send + Sync + 'static,
  {
    Observable::create(move |emitter, token| {
      let observer = ObserveOnObserver { observer: emitter, scheduler: scheduler.clone() };
      self.actual_subscribe(observer, token.child());
      Ok(())
    })
  }
}

pub struct ObserveOnObserver<O, S> {
  observer: O,
  scheduler: S,
}

impl<Item, Err, S> Observer<Item, Err> for ObserveOnObserver<Emitter<Item, Err>, S>
where
  Item: Send + 'static,
  Err: Send + 'static,
  S: Scheduler,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_closed() {
      return;
    }
    let observer = self.observer.clone();
    self.scheduler.execute(Box::new(move || observer.next(value)));
  }

  fn error(self, err: Err) {
    let observer = self.observer;
    self.scheduler.execute(Box::new(move || observer.error(err)));
  }

  fn complete(self) {
    let observer = self.observer;
    self.scheduler.execute(Box::new(move || observer.complete()));
  }
}
