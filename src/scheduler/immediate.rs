use super::{Scheduler, Task};

/// Runs every task right away on the thread that submits it.
///
/// `subscribe_on(ImmediateScheduler)` behaves like a plain subscribe, and
/// `observe_on(ImmediateScheduler)` delivers events on the producer's thread.
/// Handy as a deterministic stand-in for a real pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
  #[inline]
  fn execute(&self, task: Task) { task() }
}
