//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::error::SchedulerError;
// Core types
pub use crate::observable::{Observable, Producer};
pub use crate::observer::{Observer, ObserverAll};
// Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::{ComputationScheduler, SingleThreadScheduler};
pub use crate::scheduler::{ImmediateScheduler, Scheduler, Task};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::IoScheduler;
pub use crate::subscriber::Emitter;
pub use crate::subscription::{CancellationToken, Disposable};
