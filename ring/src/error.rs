// src/error.rs

//! Error types returned by ring construction and enqueue.

use core::fmt;

// Generates `into_inner`, `Display` and `Error` for enums whose every variant
// carries the rejected value back to the caller.
macro_rules! impl_error_for_enum_with_inner {
    (
        $enum_name:ident < $generic_param:ident >,
        $($variant:ident ( $message:expr ) ),+
        $(,)?
    ) => {
        impl<$generic_param> $enum_name<$generic_param> {
            /// Consumes the error, returning the value that could not be enqueued.
            #[inline]
            pub fn into_inner(self) -> $generic_param {
                match self {
                    $( $enum_name::$variant(v) => v, )+
                }
            }
        }

        impl<$generic_param> fmt::Display for $enum_name<$generic_param> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $enum_name::$variant(_) => f.write_str($message), )+
                }
            }
        }

        impl<$generic_param: fmt::Debug> std::error::Error for $enum_name<$generic_param> {}
    };
}

/// Returned by `try_enqueue` when the item could not be placed in the ring.
///
/// This is an ordinary outcome, not a fault: a ring running near its bound
/// under real scheduling fills up regularly. The item is handed back so the
/// caller can retry, back off, or drop it.
#[derive(PartialEq, Eq, Clone)]
pub enum TryEnqueueError<T> {
  /// Every usable slot is occupied. The rejected item is returned.
  Full(T),
}

impl<T> TryEnqueueError<T> {
  /// Returns `true` if the ring was full.
  #[inline]
  pub fn is_full(&self) -> bool {
    matches!(self, TryEnqueueError::Full(_))
  }
}

impl<T> fmt::Debug for TryEnqueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryEnqueueError::Full(_) => write!(f, "TryEnqueueError::Full(..)"),
    }
  }
}

impl_error_for_enum_with_inner!(TryEnqueueError<T>, Full("ring buffer full"));

/// Errors that can occur when constructing a ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
  /// The requested capacity is below 2. One slot is always kept free to tell
  /// "full" from "empty", so a single slot could never hold an item.
  TooSmall(usize),
  /// The requested capacity is not a power of two, so cursor wraparound
  /// cannot be computed with a bitmask.
  NotPowerOfTwo(usize),
}

impl CapacityError {
  /// Checks `capacity` against the ring's construction rules.
  pub(crate) fn check(capacity: usize) -> Result<(), CapacityError> {
    if capacity < 2 {
      return Err(CapacityError::TooSmall(capacity));
    }
    if !capacity.is_power_of_two() {
      return Err(CapacityError::NotPowerOfTwo(capacity));
    }
    Ok(())
  }

  /// The capacity that was rejected.
  pub fn requested(&self) -> usize {
    match *self {
      CapacityError::TooSmall(n) | CapacityError::NotPowerOfTwo(n) => n,
    }
  }
}

impl fmt::Display for CapacityError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CapacityError::TooSmall(n) => {
        write!(f, "ring buffer capacity must be at least 2, got {}", n)
      }
      CapacityError::NotPowerOfTwo(n) => {
        write!(f, "ring buffer capacity must be a power of two, got {}", n)
      }
    }
  }
}

impl std::error::Error for CapacityError {}
