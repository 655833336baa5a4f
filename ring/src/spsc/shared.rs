use crate::error::{CapacityError, TryEnqueueError};
use crate::internal::cache_padded::CachePadded;
use crate::telemetry::{self, names};

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared core of the SPSC ring: slot storage plus the two cursors.
///
/// Both cursors always hold a masked slot index in `[0, capacity)`. The slot
/// at `head` is the next one the producer writes, the slot at `tail` the next
/// one the consumer reads. `head == tail` means empty, so one slot is always
/// left free and at most `capacity - 1` items are stored.
pub(crate) struct RingShared<T> {
  // Cursors first, each on its own line, ahead of the storage pointer.
  head: CachePadded<AtomicUsize>, // Write cursor (producer)
  tail: CachePadded<AtomicUsize>, // Read cursor (consumer)
  mask: usize,
  buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// A slot is only touched by the role that currently owns it, and ownership
// moves through the release/acquire pair on the cursors.
unsafe impl<T: Send> Send for RingShared<T> {}
unsafe impl<T: Send> Sync for RingShared<T> {}

impl<T> fmt::Debug for RingShared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingShared")
      .field("capacity", &self.capacity())
      .field("head", &self.head.load(Ordering::Relaxed))
      .field("tail", &self.tail.load(Ordering::Relaxed))
      .finish_non_exhaustive()
  }
}

impl<T> RingShared<T> {
  /// Allocates `capacity` slots. This is the only allocation the ring makes.
  pub(crate) fn new(capacity: usize) -> Result<Self, CapacityError> {
    CapacityError::check(capacity)?;
    Ok(Self::with_valid_capacity(capacity))
  }

  /// Allocates a ring whose capacity has already been checked.
  ///
  /// `capacity` must be a power of two and at least 2.
  pub(crate) fn with_valid_capacity(capacity: usize) -> Self {
    debug_assert!(CapacityError::check(capacity).is_ok());
    let buffer = (0..capacity)
      .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
      .collect::<Vec<_>>()
      .into_boxed_slice();

    tracing::debug!(capacity, usable = capacity - 1, "spsc ring allocated");
    telemetry::log_event(Some(capacity), names::LIFECYCLE, "RingCreated", None);

    RingShared {
      head: CachePadded::new(AtomicUsize::new(0)),
      tail: CachePadded::new(AtomicUsize::new(0)),
      mask: capacity - 1,
      buffer,
    }
  }

  #[inline]
  pub(crate) fn capacity(&self) -> usize {
    self.mask + 1
  }

  /// Places `item` in the next free slot.
  ///
  /// # Safety
  ///
  /// The caller must be the ring's only producer: no other thread may run
  /// `try_enqueue` on this ring for as long as this call is in progress.
  #[inline]
  pub(crate) unsafe fn try_enqueue(&self, item: T) -> Result<(), TryEnqueueError<T>> {
    // Only this thread stores `head`, so its own last value needs no sync.
    let head = self.head.load(Ordering::Relaxed);
    let next = (head + 1) & self.mask;

    // Pairs with the consumer's release of `tail`: every slot it has moved
    // out of is free once we see the new position.
    if next == self.tail.load(Ordering::Acquire) {
      telemetry::increment_counter(names::ENQUEUE, names::FULL);
      return Err(TryEnqueueError::Full(item));
    }

    (*self.buffer[head].get()).write(item);

    // Release after the slot write so an acquiring consumer sees the item.
    self.head.store(next, Ordering::Release);
    Ok(())
  }

  /// Moves the oldest published item out of the ring.
  ///
  /// # Safety
  ///
  /// The caller must be the ring's only consumer: no other thread may run
  /// `try_dequeue` on this ring for as long as this call is in progress.
  #[inline]
  pub(crate) unsafe fn try_dequeue(&self) -> Option<T> {
    let tail = self.tail.load(Ordering::Relaxed);

    // Pairs with the producer's release of `head`.
    if tail == self.head.load(Ordering::Acquire) {
      telemetry::increment_counter(names::DEQUEUE, names::EMPTY);
      return None;
    }

    let item = (*self.buffer[tail].get()).assume_init_read();

    // Hands the slot back to the producer for its next lap.
    self.tail.store((tail + 1) & self.mask, Ordering::Release);
    Some(item)
  }

  /// Number of stored items from two uncoordinated relaxed loads.
  ///
  /// Either cursor may move between the loads, so the result is a snapshot
  /// for diagnostics only. The mask keeps it within `[0, capacity - 1]`.
  #[inline]
  pub(crate) fn approximate_size(&self) -> usize {
    let head = self.head.load(Ordering::Relaxed);
    let tail = self.tail.load(Ordering::Relaxed);
    head.wrapping_sub(tail) & self.mask
  }

  /// Relaxed emptiness check. May be stale by the time the caller acts on it.
  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.head.load(Ordering::Relaxed) == self.tail.load(Ordering::Relaxed)
  }
}

impl<T> Drop for RingShared<T> {
  fn drop(&mut self) {
    // Exclusive access: both handles are gone.
    let head = *self.head.get_mut();
    let mut tail = *self.tail.get_mut();
    let remaining = head.wrapping_sub(tail) & self.mask;

    if remaining > 0 {
      tracing::trace!(remaining, "dropping undelivered items with spsc ring");
      telemetry::log_event(
        Some(remaining),
        names::LIFECYCLE,
        "RingDroppedWithItems",
        None,
      );
    }

    while tail != head {
      // Slots in [tail, head) were written and never moved out.
      unsafe { self.buffer[tail].get_mut().assume_init_drop() };
      tail = (tail + 1) & self.mask;
    }
  }
}
