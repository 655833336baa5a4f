mod common;
use common::*;

use fibre_ring::spsc;
use fibre_ring::Backoff;

use std::thread;

#[test]
fn spsc_no_loss_no_duplication() {
  let (mut p, mut c) = spsc::ring_buffer::<usize>(1024).unwrap();

  let producer = thread::spawn(move || {
    let backoff = Backoff::new();
    for i in 0..ITEMS_HIGH {
      enqueue_retrying(&mut p, i, &backoff);
    }
  });

  let consumer = thread::spawn(move || {
    let backoff = Backoff::new();
    let mut seen = vec![false; ITEMS_HIGH];
    let mut last: Option<usize> = None;
    for _ in 0..ITEMS_HIGH {
      let v = dequeue_retrying(&mut c, &backoff);
      assert!(!seen[v], "item {} received twice", v);
      seen[v] = true;
      if let Some(prev) = last {
        assert!(v > prev, "item {} arrived after {}", v, prev);
      }
      last = Some(v);
    }
    assert!(c.try_dequeue().is_none());
    seen
  });

  producer.join().unwrap();
  let seen = consumer.join().unwrap();
  assert!(seen.iter().all(|&s| s), "some items never arrived");
}

#[test]
fn spsc_approximate_size_stays_bounded_under_contention() {
  const CAPACITY: usize = 8;
  let (mut p, mut c) = spsc::ring_buffer::<usize>(CAPACITY).unwrap();

  let producer = thread::spawn(move || {
    let mut max_seen = 0;
    let mut sent = 0;
    while sent < ITEMS_HIGH {
      if p.try_enqueue(sent).is_ok() {
        sent += 1;
      } else {
        thread::yield_now();
      }
      let size = p.approximate_size();
      assert!(size <= CAPACITY - 1, "producer saw size {}", size);
      max_seen = max_seen.max(size);
    }
    max_seen
  });

  let consumer = thread::spawn(move || {
    let mut received = 0;
    while received < ITEMS_HIGH {
      let size = c.approximate_size();
      assert!(size <= CAPACITY - 1, "consumer saw size {}", size);
      match c.try_dequeue() {
        Some(v) => {
          assert_eq!(v, received);
          received += 1;
        }
        None => thread::yield_now(),
      }
    }
    received
  });

  let max_seen = producer.join().unwrap();
  assert_eq!(consumer.join().unwrap(), ITEMS_HIGH);
  assert!(max_seen <= CAPACITY - 1);
}

#[test]
#[cfg(not(debug_assertions))]
fn spsc_tsan_stress_test() {
  // Run with RUSTFLAGS="-Z sanitizer=thread" cargo +nightly test --release spsc_tsan_stress_test
  let (mut p, mut c) = spsc::ring_buffer::<(usize, u64)>(16).unwrap();
  let items = 1_000_000;

  let producer = thread::spawn(move || {
    for i in 0..items {
      let mut item = (i, (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
      while let Err(full) = p.try_enqueue(item) {
        item = full.into_inner();
        std::hint::spin_loop();
      }
      if i % 10 == 0 {
        thread::yield_now();
      }
    }
  });

  let mut count = 0;
  while count < items {
    if let Some((i, check)) = c.try_dequeue() {
      assert_eq!(i, count);
      assert_eq!(check, (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
      count += 1;
    }
  }

  producer.join().unwrap();
  assert_eq!(count, items);
}
