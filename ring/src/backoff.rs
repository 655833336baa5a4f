//! Caller-side retry pacing for full or empty rings.
//!
//! The ring never waits on its own. Code that wants to retry a `Full` enqueue
//! or an empty dequeue can pace its loop with [`Backoff`]: a short burst of
//! spin hints, then yielding the thread to the scheduler.

use std::cell::Cell;
use std::fmt;
use std::thread;

const SPIN_LIMIT: u32 = 6;
const YIELD_LIMIT: u32 = 10;

/// Exponential spin, then yield.
///
/// Each call to [`snooze`](Backoff::snooze) waits a little longer than the
/// last: `2^step` spin hints for the first steps, then a `yield_now` per call.
/// Call [`reset`](Backoff::reset) after a successful operation.
pub struct Backoff {
  step: Cell<u32>,
}

impl Backoff {
  /// Creates a backoff at its first step.
  #[inline]
  pub fn new() -> Self {
    Backoff { step: Cell::new(0) }
  }

  /// Returns to the first step.
  #[inline]
  pub fn reset(&self) {
    self.step.set(0);
  }

  /// Busy-spins for the current step without yielding. Suited to retries
  /// where the other side is known to be running.
  #[inline]
  pub fn spin(&self) {
    for _ in 0..1u32 << self.step.get().min(SPIN_LIMIT) {
      std::hint::spin_loop();
    }
    if self.step.get() <= SPIN_LIMIT {
      self.step.set(self.step.get() + 1);
    }
  }

  /// Spins while the step is small, then yields the thread.
  #[inline]
  pub fn snooze(&self) {
    if self.step.get() <= SPIN_LIMIT {
      for _ in 0..1u32 << self.step.get() {
        std::hint::spin_loop();
      }
    } else {
      thread::yield_now();
    }
    if self.step.get() <= YIELD_LIMIT {
      self.step.set(self.step.get() + 1);
    }
  }

  /// `true` once spinning has given way to yielding. A caller with a
  /// blocking fallback of its own can switch to it at this point.
  #[inline]
  pub fn is_completed(&self) -> bool {
    self.step.get() > YIELD_LIMIT
  }
}

impl Default for Backoff {
  fn default() -> Self {
    Backoff::new()
  }
}

impl fmt::Debug for Backoff {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Backoff")
      .field("step", &self.step.get())
      .field("is_completed", &self.is_completed())
      .finish()
  }
}
