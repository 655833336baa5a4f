// src/internal/cache_padded.rs

//! Cache line isolation for the ring cursors.
//!
//! The write cursor is stored by the producer core and the read cursor by the
//! consumer core, both at high frequency. Keeping them on one line would make
//! every store invalidate the other side's copy.

use core::fmt;
use core::ops::{Deref, DerefMut};

#[cfg(not(any(
  all(target_arch = "aarch64", target_vendor = "apple"),
  target_arch = "powerpc64"
)))]
#[repr(C, align(64))]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Line64<T> {
  value: T,
}

#[cfg(any(
  all(target_arch = "aarch64", target_vendor = "apple"),
  target_arch = "powerpc64"
))]
#[repr(C, align(128))]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Line128<T> {
  value: T,
}

// Apple silicon and POWER fetch lines in pairs, so a 64 byte gap still shares
// a prefetch unit there.
#[cfg(any(
  all(target_arch = "aarch64", target_vendor = "apple"),
  target_arch = "powerpc64"
))]
mod line {
  pub(crate) const SIZE: usize = 128;
  pub(crate) type Aligned<T> = super::Line128<T>;
}

#[cfg(not(any(
  all(target_arch = "aarch64", target_vendor = "apple"),
  target_arch = "powerpc64"
)))]
mod line {
  pub(crate) const SIZE: usize = 64;
  pub(crate) type Aligned<T> = super::Line64<T>;
}

/// Cache line size used for padding on the current target.
pub(crate) const CACHE_LINE_SIZE: usize = line::SIZE;

/// A value padded and aligned to a full cache line.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CachePadded<T> {
  inner: line::Aligned<T>,
}

impl<T> CachePadded<T> {
  #[inline]
  pub(crate) const fn new(value: T) -> Self {
    CachePadded {
      inner: line::Aligned { value },
    }
  }
}

impl<T> Deref for CachePadded<T> {
  type Target = T;
  #[inline]
  fn deref(&self) -> &T {
    &self.inner.value
  }
}

impl<T> DerefMut for CachePadded<T> {
  #[inline]
  fn deref_mut(&mut self) -> &mut T {
    &mut self.inner.value
  }
}

impl<T: fmt::Debug> fmt::Debug for CachePadded<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CachePadded")
      .field("value", &self.inner.value)
      .field("line", &CACHE_LINE_SIZE)
      .finish()
  }
}
