//! Example: wiring pipelines end to end
//!
//! Runs a handful of small pipelines and prints what reaches the subscriber,
//! including which thread it arrived on. Set `RUST_LOG=rxflow=trace` to see
//! the library's own logging.

use std::{sync::mpsc, thread, time::Duration};

use rxflow::prelude::*;
use tracing_subscriber::EnvFilter;

fn thread_name() -> String { thread::current().name().unwrap_or("<unnamed>").to_owned() }

fn basic_emission() {
  println!("--- basic emission ---");
  Observable::<&str, String>::create(|emitter, _| {
    emitter.next("Hello");
    emitter.next("World");
    emitter.complete();
    Ok(())
  })
  .subscribe_all(
    |v| println!("next: {v}"),
    |e| println!("error: {e}"),
    || println!("complete"),
  );

  Observable::<&str, String>::create(|emitter, _| {
    emitter.next("about to fail");
    Err("producer failed".to_owned())
  })
  .subscribe_all(
    |v| println!("next: {v}"),
    |e| println!("error: {e}"),
    || println!("complete"),
  );
}

fn map_and_filter() {
  println!("--- map then filter ---");
  Observable::<i32, ()>::from_iter([1, 2, 3])
    .map(|x| x * 10)
    .filter(|x| x % 20 == 0)
    .subscribe_all(|v| println!("next: {v}"), |_| {}, || println!("complete"));

  println!("--- filter then map ---");
  Observable::<i32, ()>::from_iter([1, 2, 3])
    .filter(|x| x % 2 == 1)
    .map(|x| x * 10)
    .subscribe_all(|v| println!("next: {v}"), |_| {}, || println!("complete"));
}

fn flat_map() {
  println!("--- flat_map ---");
  Observable::<_, ()>::from_iter(["A", "B"])
    .flat_map(|s| Observable::from_iter([format!("{s}1"), format!("{s}2")]))
    .subscribe_all(|v| println!("next: {v}"), |_| {}, || println!("complete"));
}

fn thread_hand_off() -> Result<(), SchedulerError> {
  println!("--- subscribe_on(io) + observe_on(single thread) ---");
  println!("subscribing from {}", thread_name());
  let (done_tx, done_rx) = mpsc::channel();
  Observable::<i32, String>::create(|emitter, _| {
    println!("producing on {}", thread_name());
    for i in 0..3 {
      emitter.next(i);
    }
    emitter.complete();
    Ok(())
  })
  .subscribe_on(IoScheduler::new()?)
  .observe_on(SingleThreadScheduler::new()?)
  .subscribe_all(
    |v| println!("next: {v} on {}", thread_name()),
    |e| println!("error: {e}"),
    move || {
      println!("complete on {}", thread_name());
      let _ = done_tx.send(());
    },
  );
  println!("subscribe returned on {}", thread_name());
  let _ = done_rx.recv_timeout(Duration::from_secs(1));
  Ok(())
}

fn cancellation() -> Result<(), SchedulerError> {
  println!("--- cancelling a ticking producer ---");
  let (stopped_tx, stopped_rx) = mpsc::channel();
  let disposable = Observable::<u64, String>::create(move |emitter, token| {
    let mut tick = 0;
    while !token.is_cancelled() {
      emitter.next(tick);
      tick += 1;
      thread::sleep(Duration::from_millis(50));
    }
    let _ = stopped_tx.send(tick);
    Ok(())
  })
  .subscribe_on(ComputationScheduler::new()?)
  .subscribe_all(|v| println!("tick {v}"), |e| println!("error: {e}"), || {});

  thread::sleep(Duration::from_millis(220));
  disposable.dispose();
  println!("disposed: {}", disposable.is_disposed());
  if let Ok(ticks) = stopped_rx.recv_timeout(Duration::from_secs(1)) {
    println!("producer stopped after {ticks} ticks");
  }
  Ok(())
}

fn main() -> Result<(), SchedulerError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  basic_emission();
  map_and_filter();
  flat_map();
  thread_hand_off()?;
  cancellation()?;
  Ok(())
}
