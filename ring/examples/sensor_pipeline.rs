//! A sampling thread feeds sensor readings to a processing thread through a
//! 1024-slot SPSC ring, then reports throughput.
//!
//! Run with `RUST_LOG=fibre_ring=debug cargo run --example sensor_pipeline`
//! to see the ring's lifecycle logs.

use fibre_ring::spsc;
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const QUEUE_SIZE: usize = 1024;
const TOTAL_ITEMS: u64 = 100_000;

#[derive(Debug, Clone, Copy)]
struct SensorData {
  channel: u32,
  value: f64,
  timestamp: u64,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let (mut producer, mut consumer) = spsc::ring_buffer_const::<SensorData, QUEUE_SIZE>();

  let start = Instant::now();

  let producer_handle = thread::spawn(move || {
    for i in 0..TOTAL_ITEMS {
      let mut data = SensorData {
        channel: (i % 4) as u32,
        value: i as f64 * 0.1,
        timestamp: i,
      };
      // Yield on full; a real sampler might drop or coalesce instead.
      while let Err(full) = producer.try_enqueue(data) {
        data = full.into_inner();
        thread::yield_now();
      }
    }
    producer
  });

  let consumer_handle = thread::spawn(move || {
    let mut received = 0u64;
    let mut per_channel = [0u64; 4];
    let mut value_sum = 0.0f64;
    while received < TOTAL_ITEMS {
      match consumer.try_dequeue() {
        Some(data) => {
          assert_eq!(data.timestamp, received, "readings arrived out of order");
          per_channel[data.channel as usize] += 1;
          value_sum += data.value;
          received += 1;
        }
        None => thread::yield_now(),
      }
    }
    (consumer, received, per_channel, value_sum)
  });

  let producer = producer_handle.join().unwrap();
  let (consumer, received, per_channel, value_sum) = consumer_handle.join().unwrap();
  let elapsed = start.elapsed();

  println!("=== SPSC ring sensor pipeline ===");
  println!("Items transferred: {}", received);
  println!("Elapsed: {} us", elapsed.as_micros());
  println!(
    "Throughput: {:.0} items/s",
    received as f64 / elapsed.as_secs_f64()
  );
  println!("Per channel: {:?}", per_channel);
  println!("Mean reading: {:.3}", value_sum / received as f64);
  println!("Remaining in ring: {}", consumer.approximate_size());

  assert_eq!(received, TOTAL_ITEMS);
  assert!(producer.is_empty());
  println!("All readings received in order");
}
