use tracing::trace;

use crate::{observable::Observable, scheduler::Scheduler};

impl<Item: 'static, Err: Send + 'static> Observable<Item, Err> {
  /// Runs the upstream producer on `scheduler` instead of the subscribing
  /// thread.
  ///
  /// `subscribe` returns as soon as the task is submitted. The producer later
  /// runs on a scheduler thread, against the same guarded emitter and token
  /// the subscription was given; if the subscription is disposed before the
  /// task starts, the producer is not run at all.
  pub fn subscribe_on<S>(self, scheduler: S) -> Observable<Item, Err>
  where
    S: Scheduler + Send + Sync + 'static,
  {
    Observable::create(move |emitter, _| {
      let source = self.clone();
      scheduler.execute(Box::new(move || {
        if emitter.is_closed() {
          trace!("subscription closed before its producer was scheduled");
          return;
        }
        source.run(emitter);
      }));
      Ok(())
    })
  }
}
