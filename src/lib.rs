//! # rxflow: push-based reactive streams
//!
//! A small implementation of [Reactive Extensions](http://reactivex.io/):
//! cold observables built from a producer function, composed with operators
//! and moved between threads with schedulers.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxflow::prelude::*;
//!
//! let out = std::sync::Arc::new(std::sync::Mutex::new(vec![]));
//! let c_out = out.clone();
//! Observable::<i32, ()>::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe_all(move |v| c_out.lock().unwrap().push(v), |_| {}, || {});
//! assert_eq!(*out.lock().unwrap(), vec![0, 4, 8, 12, 16]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Cold description of a stream; operators chain on it |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Emitter`] | Guarded observer a producer pushes into |
//! | [`Disposable`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Where producers run (`subscribe_on`) or events land (`observe_on`) |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `ComputationScheduler` and
//!   `SingleThreadScheduler`, backed by `futures` thread pools
//! - **`tokio-scheduler`** (default): `IoScheduler`, backed by the tokio
//!   blocking pool
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Emitter`]: subscriber::Emitter
//! [`Disposable`]: subscription::Disposable
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
