//! Builder and serializable settings for constructing rings.

use crate::error::CapacityError;
use crate::spsc::{Consumer, Producer, RingBuffer};

use core::fmt;

/// Default slot count when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Plain ring settings, loadable from a config file with the `serde` feature.
///
/// ```yaml
/// capacity: 4096
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RingConfig {
  /// Total slot count. Must be a power of two and at least 2.
  pub capacity: usize,
}

impl Default for RingConfig {
  fn default() -> Self {
    RingConfig {
      capacity: DEFAULT_CAPACITY,
    }
  }
}

/// A builder for [`RingBuffer`] instances.
///
/// ```
/// use fibre_ring::RingBuilder;
///
/// // Room for at least 100 in-flight items.
/// let ring = RingBuilder::new().capacity_for_items(100).build::<u64>().unwrap();
/// assert_eq!(ring.capacity(), 128);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct RingBuilder {
  config: RingConfig,
}

impl fmt::Debug for RingBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuilder")
      .field("capacity", &self.config.capacity)
      .finish()
  }
}

impl RingBuilder {
  /// Starts from [`RingConfig::default`].
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts from an existing configuration.
  pub fn from_config(config: &RingConfig) -> Self {
    RingBuilder { config: *config }
  }

  /// Sets the exact slot count. Validated by [`build`](RingBuilder::build).
  pub fn capacity(mut self, capacity: usize) -> Self {
    self.config.capacity = capacity;
    self
  }

  /// Sets the smallest valid slot count that holds `items` at once.
  ///
  /// One slot is reserved, so this is `items + 1` rounded up to a power of
  /// two (never less than 2).
  pub fn capacity_for_items(mut self, items: usize) -> Self {
    self.config.capacity = items.saturating_add(1).max(2).next_power_of_two();
    self
  }

  /// The configuration as it stands.
  pub fn config(&self) -> RingConfig {
    self.config
  }

  pub(crate) fn validate(&self) -> Result<(), CapacityError> {
    CapacityError::check(self.config.capacity)
  }

  /// Builds an unsplit ring.
  ///
  /// # Errors
  ///
  /// Returns a [`CapacityError`] if the configured capacity is invalid.
  pub fn build<T>(self) -> Result<RingBuffer<T>, CapacityError> {
    if let Err(e) = self.validate() {
      tracing::debug!(error = %e, "rejected spsc ring configuration");
      return Err(e);
    }
    RingBuffer::new(self.config.capacity)
  }

  /// Builds a ring and splits it into its producer and consumer.
  ///
  /// # Errors
  ///
  /// Returns a [`CapacityError`] if the configured capacity is invalid.
  pub fn build_split<T>(self) -> Result<(Producer<T>, Consumer<T>), CapacityError> {
    Ok(self.build()?.split())
  }
}
