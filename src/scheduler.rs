//! Execution contexts.
//!
//! A [`Scheduler`] runs a unit of work, possibly on another thread than the
//! caller. `subscribe_on` hands the producer to one, `observe_on` hands each
//! event to one. The providers differ only in worker topology:
//!
//! | Scheduler | Workers | Order |
//! |-----------|---------|-------|
//! | [`ComputationScheduler`] | fixed, one per hardware thread | none |
//! | [`IoScheduler`] | grows on demand, idle workers reaped | none |
//! | [`SingleThreadScheduler`] | one dedicated thread | FIFO |
//! | [`ImmediateScheduler`] | the caller's thread | FIFO |
//!
//! None of them expose shutdown: workers live as long as a handle does. A
//! task that panics ends only that task; the worker goes on with the next.
use std::{
  any::Any,
  panic::{self, AssertUnwindSafe},
  sync::Arc,
};

use tracing::error;

mod immediate;
pub use immediate::ImmediateScheduler;

#[cfg(feature = "futures-scheduler")]
mod computation;
#[cfg(feature = "futures-scheduler")]
pub use computation::ComputationScheduler;

#[cfg(feature = "futures-scheduler")]
mod single_thread;
#[cfg(feature = "futures-scheduler")]
pub use single_thread::SingleThreadScheduler;

#[cfg(feature = "tokio-scheduler")]
mod io;
#[cfg(feature = "tokio-scheduler")]
pub use io::IoScheduler;

/// A unit of work submitted to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A Scheduler is an object that runs tasks, possibly on other threads.
///
/// Implementations only promise that every submitted task runs once. Whether
/// tasks submitted one after another also run one after another is up to the
/// implementation.
pub trait Scheduler {
  fn execute(&self, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
  #[inline]
  fn execute(&self, task: Task) { (**self).execute(task) }
}

/// Runs `task` on a pool worker, containing a panic to the task itself.
#[cfg_attr(not(any(feature = "futures-scheduler", feature = "tokio-scheduler")), allow(dead_code))]
pub(crate) fn run_task(scheduler: &'static str, task: Task) {
  if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
    error!(scheduler, panic = panic_message(payload.as_ref()), "scheduled task panicked");
  }
}

#[cfg_attr(not(any(feature = "futures-scheduler", feature = "tokio-scheduler")), allow(dead_code))]
fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(msg) = payload.downcast_ref::<&'static str>() {
    msg
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg
  } else {
    "<non-string panic payload>"
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[rxflow_macro::test]
  fn shared_through_arc() {
    let scheduler: Arc<dyn Scheduler + Send + Sync> = Arc::new(ImmediateScheduler);
    let ran = Arc::new(Mutex::new(0));
    for _ in 0..2 {
      let c_ran = ran.clone();
      scheduler.execute(Box::new(move || *c_ran.lock().unwrap() += 1));
    }
    assert_eq!(*ran.lock().unwrap(), 2);
  }

  #[rxflow_macro::test]
  fn task_panic_stays_inside_the_task() {
    run_task("test", Box::new(|| panic!("boom")));
    run_task("test", Box::new(|| std::panic::panic_any(format!("boom {}", 2))));

    let ran = Arc::new(Mutex::new(false));
    let c_ran = ran.clone();
    run_task("test", Box::new(move || *c_ran.lock().unwrap() = true));
    assert!(*ran.lock().unwrap());
  }

  #[rxflow_macro::test]
  fn panic_payloads_are_readable() {
    let payload: Box<dyn Any + Send> = Box::new("static");
    assert_eq!(panic_message(payload.as_ref()), "static");
    let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
    assert_eq!(panic_message(payload.as_ref()), "owned");
    let payload: Box<dyn Any + Send> = Box::new(7);
    assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
  }
}
