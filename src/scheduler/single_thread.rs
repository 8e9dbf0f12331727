use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{executor::ThreadPool, future};
use tracing::debug;

use super::{run_task, Scheduler, Task};
use crate::error::SchedulerError;

/// One dedicated worker thread; tasks run strictly in submission order.
///
/// Clones share the worker. The thread is named `rx-single-<pool>-0` and
/// exits once the last handle is dropped and its queue has drained.
#[derive(Clone)]
pub struct SingleThreadScheduler {
  worker: ThreadPool,
}

impl SingleThreadScheduler {
  pub fn new() -> Result<Self, SchedulerError> {
    static WORKERS: AtomicUsize = AtomicUsize::new(1);

    let worker_id = WORKERS.fetch_add(1, Ordering::Relaxed);
    let worker = ThreadPool::builder()
      .pool_size(1)
      .name_prefix(format!("rx-single-{worker_id}-"))
      .create()
      .map_err(|source| SchedulerError::Spawn { scheduler: "single-thread", source })?;
    debug!(worker = worker_id, "single-thread scheduler started");
    Ok(SingleThreadScheduler { worker })
  }
}

impl Scheduler for SingleThreadScheduler {
  fn execute(&self, task: Task) {
    self
      .worker
      .spawn_ok(future::lazy(move |_| run_task("single-thread", task)));
  }
}
