// src/spsc/mod.rs

//! Single-Producer, Single-Consumer (SPSC) ring buffer.
//!
//! The ring is a fixed array of slots plus two cursors. The producer owns the
//! write cursor and the consumer owns the read cursor; each cursor has exactly
//! one writer, so no lock is needed. A slot changes hands through a release
//! store of a cursor and the matching acquire load on the other side.
//!
//! # Features
//! - **Bounded**: capacity is fixed at construction, must be a power of two
//!   of at least 2, and one slot stays free, so `capacity - 1` items fit.
//! - **Non-blocking**: [`Producer::try_enqueue`] and [`Consumer::try_dequeue`]
//!   run in bounded time and never wait. Full and empty are plain return
//!   values; retry policy is up to the caller.
//! - **Role handles**: there is one `Producer` and one `Consumer` per ring.
//!   Neither is `Clone` or `Sync`, so two threads cannot act as the same role.
//! - **Cache-Padding**: the two cursors live on separate cache lines.
//! - **Drop Safety**: items still in the ring when the last handle goes away
//!   are dropped.
//!
//! # Examples
//!
//! ```
//! use fibre_ring::spsc;
//! use fibre_ring::Backoff;
//! use std::thread;
//!
//! let (mut producer, mut consumer) = spsc::ring_buffer::<String>(4).unwrap();
//!
//! let producer_handle = thread::spawn(move || {
//!   let backoff = Backoff::new();
//!   for i in 0..10 {
//!     let mut item = format!("Item {}", i);
//!     loop {
//!       match producer.try_enqueue(item) {
//!         Ok(()) => break,
//!         Err(full) => {
//!           item = full.into_inner();
//!           backoff.snooze();
//!         }
//!       }
//!     }
//!     backoff.reset();
//!   }
//! });
//!
//! let mut received = Vec::new();
//! let backoff = Backoff::new();
//! while received.len() < 10 {
//!   match consumer.try_dequeue() {
//!     Some(item) => {
//!       received.push(item);
//!       backoff.reset();
//!     }
//!     None => backoff.snooze(),
//!   }
//! }
//!
//! producer_handle.join().unwrap();
//! assert_eq!(received[0], "Item 0");
//! assert_eq!(received[9], "Item 9");
//! ```

mod handles;
pub(crate) mod shared;

pub use handles::{Consumer, Producer, RingBuffer};

pub use crate::error::{CapacityError, TryEnqueueError};

/// Creates a ring with `capacity` slots and splits it into its two handles.
///
/// # Errors
///
/// Returns a [`CapacityError`] if `capacity` is below 2 or not a power of two.
pub fn ring_buffer<T>(capacity: usize) -> Result<(Producer<T>, Consumer<T>), CapacityError> {
  Ok(RingBuffer::new(capacity)?.split())
}

/// Like [`ring_buffer`], with the capacity checked at compile time.
pub fn ring_buffer_const<T, const N: usize>() -> (Producer<T>, Consumer<T>) {
  RingBuffer::with_const_capacity::<N>().split()
}
