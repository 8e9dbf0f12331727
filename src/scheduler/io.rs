use std::{
  sync::atomic::{AtomicUsize, Ordering},
  time::Duration,
};

use once_cell::sync::OnceCell;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

use super::{run_task, Scheduler, Task};
use crate::error::SchedulerError;

/// Upper bound on concurrently blocked io workers.
const MAX_IO_THREADS: usize = 512;
/// How long an idle io worker waits for new work before exiting.
const IO_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Backing runtime, created on first use and kept for the process lifetime.
/// Only its blocking pool is used; nothing ever drives its event loop.
static IO_RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Unbounded-style pool for blocking or IO-bound work.
///
/// A task gets an idle worker if there is one, otherwise a new worker is
/// started. Workers idle for a minute exit. Workers are named `rx-io-<n>`.
/// All `IoScheduler` handles share one process-wide pool.
///
/// Growth is capped at 512 concurrent workers, tokio's own default for its
/// blocking pool. Past that, tasks queue until a worker frees up instead of
/// each getting a fresh thread.
#[derive(Clone)]
pub struct IoScheduler {
  handle: Handle,
}

impl IoScheduler {
  pub fn new() -> Result<Self, SchedulerError> {
    let runtime = IO_RUNTIME.get_or_try_init(|| {
      static THREADS: AtomicUsize = AtomicUsize::new(1);

      let runtime = Builder::new_current_thread()
        .thread_name_fn(|| format!("rx-io-{}", THREADS.fetch_add(1, Ordering::Relaxed)))
        .max_blocking_threads(MAX_IO_THREADS)
        .thread_keep_alive(IO_KEEP_ALIVE)
        .build()
        .map_err(|source| SchedulerError::Spawn { scheduler: "io", source })?;
      debug!(max_threads = MAX_IO_THREADS, "io scheduler pool started");
      Ok::<_, SchedulerError>(runtime)
    })?;
    Ok(IoScheduler { handle: runtime.handle().clone() })
  }
}

impl Scheduler for IoScheduler {
  fn execute(&self, task: Task) {
    // Detached: the join handle is not needed to keep the task alive.
    drop(self.handle.spawn_blocking(move || run_task("io", task)));
  }
}
