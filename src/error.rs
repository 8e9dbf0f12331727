use thiserror::Error;

/// Failure to bring up a scheduler's worker threads.
#[derive(Debug, Error)]
pub enum SchedulerError {
  #[error("failed to start {scheduler} worker threads")]
  Spawn {
    scheduler: &'static str,
    #[source]
    source: std::io::Error,
  },
}
