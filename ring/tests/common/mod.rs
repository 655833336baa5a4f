#![allow(dead_code)]

use fibre_ring::{Backoff, Consumer, Producer};

pub const ITEMS_LOW: usize = 50;
pub const ITEMS_MEDIUM: usize = 1_000;
pub const ITEMS_HIGH: usize = 100_000;

/// Enqueues `item`, snoozing on every `Full` until it goes through.
pub fn enqueue_retrying<T>(producer: &mut Producer<T>, mut item: T, backoff: &Backoff) {
  loop {
    match producer.try_enqueue(item) {
      Ok(()) => {
        backoff.reset();
        return;
      }
      Err(full) => {
        item = full.into_inner();
        backoff.snooze();
      }
    }
  }
}

/// Dequeues one item, snoozing while the ring is empty.
pub fn dequeue_retrying<T>(consumer: &mut Consumer<T>, backoff: &Backoff) -> T {
  loop {
    if let Some(item) = consumer.try_dequeue() {
      backoff.reset();
      return item;
    }
    backoff.snooze();
  }
}
