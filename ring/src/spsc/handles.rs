use crate::error::{CapacityError, TryEnqueueError};
use crate::spsc::shared::RingShared;

use std::marker::PhantomData;
use std::sync::Arc;

/// Compile-time capacity check for [`RingBuffer::with_const_capacity`].
struct ConstCapacity<const N: usize>;

impl<const N: usize> ConstCapacity<N> {
  const VALID: () = assert!(
    N >= 2 && N.is_power_of_two(),
    "ring buffer capacity must be a power of two and at least 2"
  );
}

/// An SPSC ring that has not been split into its two role handles yet.
///
/// While unsplit, the ring can be driven from one thread through `&mut self`,
/// which is enough to prove there is a single producer and a single consumer.
/// Call [`split`](RingBuffer::split) to move the two roles onto two threads.
#[derive(Debug)]
pub struct RingBuffer<T> {
  shared: Arc<RingShared<T>>,
}

impl<T> RingBuffer<T> {
  /// Creates a ring with `capacity` slots, of which `capacity - 1` can hold
  /// items at once.
  ///
  /// # Errors
  ///
  /// - `Err(CapacityError::TooSmall(n))` if `capacity < 2`.
  /// - `Err(CapacityError::NotPowerOfTwo(n))` if `capacity` is not a power of two.
  pub fn new(capacity: usize) -> Result<Self, CapacityError> {
    Ok(RingBuffer {
      shared: Arc::new(RingShared::new(capacity)?),
    })
  }

  /// Creates a ring whose capacity is checked at compile time.
  ///
  /// ```
  /// let ring = fibre_ring::RingBuffer::<u32>::with_const_capacity::<16>();
  /// assert_eq!(ring.capacity(), 16);
  /// ```
  ///
  /// A capacity that is not a power of two does not build:
  ///
  /// ```compile_fail
  /// let ring = fibre_ring::RingBuffer::<u32>::with_const_capacity::<10>();
  /// ```
  pub fn with_const_capacity<const N: usize>() -> Self {
    let () = ConstCapacity::<N>::VALID;
    RingBuffer {
      shared: Arc::new(RingShared::with_valid_capacity(N)),
    }
  }

  /// Total slot count. One slot is always kept free.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.shared.capacity()
  }

  /// Attempts to append `item` without blocking.
  ///
  /// # Errors
  ///
  /// - `Err(TryEnqueueError::Full(item))` if every usable slot is occupied.
  #[inline]
  pub fn try_enqueue(&mut self, item: T) -> Result<(), TryEnqueueError<T>> {
    // SAFETY: `&mut self` excludes any other caller, and the roles have not
    // been handed out yet.
    unsafe { self.shared.try_enqueue(item) }
  }

  /// Attempts to take the oldest item without blocking. `None` means empty.
  #[inline]
  pub fn try_dequeue(&mut self) -> Option<T> {
    // SAFETY: as for `try_enqueue`.
    unsafe { self.shared.try_dequeue() }
  }

  /// Best-effort item count, in `[0, capacity - 1]`. Diagnostic only.
  #[inline]
  pub fn approximate_size(&self) -> usize {
    self.shared.approximate_size()
  }

  /// Best-effort emptiness check. Diagnostic only.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.shared.is_empty()
  }

  /// Splits the ring into its producer and consumer handles.
  ///
  /// Items already stored stay in the ring and are the first ones the
  /// consumer sees.
  pub fn split(self) -> (Producer<T>, Consumer<T>) {
    tracing::debug!(
      capacity = self.capacity(),
      pending = self.approximate_size(),
      "spsc ring split into producer and consumer"
    );
    let shared = self.shared;
    (
      Producer {
        shared: Arc::clone(&shared),
        _phantom: PhantomData,
      },
      Consumer {
        shared,
        _phantom: PhantomData,
      },
    )
  }
}

/// The writing end of an SPSC ring. There is exactly one per ring.
///
/// A `Producer` can be sent to another thread but not shared between threads,
/// and it cannot be cloned, so only one thread ever advances the write cursor.
///
/// ```compile_fail
/// let (p, _c) = fibre_ring::spsc::ring_buffer::<u8>(4).unwrap();
/// let second = p.clone();
/// ```
///
/// ```compile_fail
/// fn shared_across_threads<T: Sync>() {}
/// shared_across_threads::<fibre_ring::Producer<u8>>();
/// ```
#[derive(Debug)]
pub struct Producer<T> {
  shared: Arc<RingShared<T>>,
  // Makes Producer<T> !Sync.
  _phantom: PhantomData<*mut ()>,
}

/// The reading end of an SPSC ring. There is exactly one per ring.
///
/// Like [`Producer`], it moves between threads but is neither `Clone` nor
/// `Sync`, so only one thread ever advances the read cursor.
///
/// ```compile_fail
/// let (_p, c) = fibre_ring::spsc::ring_buffer::<u8>(4).unwrap();
/// let second = c.clone();
/// ```
///
/// ```compile_fail
/// fn shared_across_threads<T: Sync>() {}
/// shared_across_threads::<fibre_ring::Consumer<u8>>();
/// ```
#[derive(Debug)]
pub struct Consumer<T> {
  shared: Arc<RingShared<T>>,
  // Makes Consumer<T> !Sync.
  _phantom: PhantomData<*mut ()>,
}

unsafe impl<T: Send> Send for Producer<T> {}
unsafe impl<T: Send> Send for Consumer<T> {}

impl<T> Producer<T> {
  /// Attempts to append `item` without blocking.
  ///
  /// Returns immediately either way. On `Full` the ring is unchanged and the
  /// item comes back inside the error; spinning, yielding or dropping it is
  /// the caller's call (see [`Backoff`](crate::Backoff)).
  ///
  /// # Errors
  ///
  /// - `Err(TryEnqueueError::Full(item))` if every usable slot is occupied.
  #[inline]
  pub fn try_enqueue(&mut self, item: T) -> Result<(), TryEnqueueError<T>> {
    // SAFETY: the only Producer for this ring, borrowed mutably, and !Sync.
    unsafe { self.shared.try_enqueue(item) }
  }

  /// Best-effort item count, in `[0, capacity - 1]`. Diagnostic only.
  #[inline]
  pub fn approximate_size(&self) -> usize {
    self.shared.approximate_size()
  }

  /// Best-effort emptiness check. Diagnostic only.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.shared.is_empty()
  }

  /// Total slot count. At most `capacity() - 1` items are stored at once.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.shared.capacity()
  }
}

impl<T> Consumer<T> {
  /// Attempts to take the oldest item without blocking.
  ///
  /// `None` means nothing has been published yet. The check is made with
  /// acquire ordering, so it does not rely on an earlier
  /// [`is_empty`](Consumer::is_empty) result.
  #[inline]
  pub fn try_dequeue(&mut self) -> Option<T> {
    // SAFETY: the only Consumer for this ring, borrowed mutably, and !Sync.
    unsafe { self.shared.try_dequeue() }
  }

  /// Best-effort item count, in `[0, capacity - 1]`. Diagnostic only.
  #[inline]
  pub fn approximate_size(&self) -> usize {
    self.shared.approximate_size()
  }

  /// Best-effort emptiness check. Diagnostic only; never gate a dequeue on it.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.shared.is_empty()
  }

  /// Total slot count. At most `capacity() - 1` items are stored at once.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.shared.capacity()
  }
}
