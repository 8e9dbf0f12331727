use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

/// Shared mutable cell for state touched from several threads.
///
/// Access never fails on a poisoned lock: a callback that panicked while
/// holding the guard leaves the data as it was, and the next caller keeps
/// going with it.
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Like [`rc_deref_mut`](MutArc::rc_deref_mut), but `None` instead of
  /// waiting when the lock is held, including by the calling thread.
  pub fn try_rc_deref_mut(&self) -> Option<MutexGuard<'_, T>> {
    match self.0.try_lock() {
      Ok(guard) => Some(guard),
      Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
      Err(TryLockError::WouldBlock) => None,
    }
  }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
