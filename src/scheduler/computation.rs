use std::{
  num::NonZeroUsize,
  sync::atomic::{AtomicUsize, Ordering},
  thread,
};

use futures::{executor::ThreadPool, future};
use tracing::debug;

use super::{run_task, Scheduler, Task};
use crate::error::SchedulerError;

/// Fixed-size pool for CPU-bound work, one worker per hardware thread.
///
/// Workers are named `rx-compute-<pool>-<n>`. Tasks submitted back to back
/// may run concurrently and finish in any order.
#[derive(Clone)]
pub struct ComputationScheduler {
  pool: ThreadPool,
}

impl ComputationScheduler {
  /// A pool sized to [`thread::available_parallelism`], or one worker if that
  /// is unknown.
  pub fn new() -> Result<Self, SchedulerError> {
    let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    Self::with_threads(threads)
  }

  /// A pool with exactly `threads` workers (at least one).
  pub fn with_threads(threads: usize) -> Result<Self, SchedulerError> {
    static POOLS: AtomicUsize = AtomicUsize::new(1);

    let threads = threads.max(1);
    let pool_id = POOLS.fetch_add(1, Ordering::Relaxed);
    let pool = ThreadPool::builder()
      .pool_size(threads)
      .name_prefix(format!("rx-compute-{pool_id}-"))
      .create()
      .map_err(|source| SchedulerError::Spawn { scheduler: "computation", source })?;
    debug!(pool = pool_id, threads, "computation scheduler started");
    Ok(ComputationScheduler { pool })
  }
}

impl Scheduler for ComputationScheduler {
  fn execute(&self, task: Task) {
    self
      .pool
      .spawn_ok(future::lazy(move |_| run_task("computation", task)));
  }
}
