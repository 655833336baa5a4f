#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! A bounded, lock-free single-producer/single-consumer ring buffer.
//!
//! `fibre_ring` moves values between exactly two threads through a
//! fixed-capacity circular array. The producer owns the write cursor, the
//! consumer owns the read cursor, and every hand-off is published with a
//! release store that the other side picks up with an acquire load. No lock
//! is taken on the data path and no memory is allocated after construction.
//! The exception is the `fibre_telemetry` debug feature: with it on, a full
//! enqueue or an empty dequeue bumps a counter behind a global mutex.
//!
//! ```
//! use fibre_ring::spsc;
//! use std::thread;
//!
//! let (mut producer, mut consumer) = spsc::ring_buffer::<u64>(8).unwrap();
//!
//! let handle = thread::spawn(move || {
//!   for i in 0..100u64 {
//!     let mut item = i;
//!     while let Err(full) = producer.try_enqueue(item) {
//!       item = full.into_inner();
//!       thread::yield_now();
//!     }
//!   }
//! });
//!
//! let mut expected = 0u64;
//! while expected < 100 {
//!   match consumer.try_dequeue() {
//!     Some(v) => {
//!       assert_eq!(v, expected);
//!       expected += 1;
//!     }
//!     None => thread::yield_now(),
//!   }
//! }
//! handle.join().unwrap();
//! ```

pub mod backoff;
pub mod builder;
pub mod error;
pub mod spsc;
pub mod telemetry;

// Internal utilities - not part of public API
mod internal;

pub use backoff::Backoff;
pub use builder::{RingBuilder, RingConfig};
pub use error::{CapacityError, TryEnqueueError};
pub use spsc::{Consumer, Producer, RingBuffer};

// Helper function to check if a type is Send + Sync.
// Useful for static assertions in generic code.
#[cfg(test)]
fn assert_send_sync<T: Send + Sync>() {}
