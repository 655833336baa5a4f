// src/telemetry.rs

//! Debug instrumentation for the ring, compiled in with the `fibre_telemetry`
//! feature.
//!
//! The ring records a counter each time an enqueue finds the ring full or a
//! dequeue finds it empty, plus an event when a ring is built and when one is
//! torn down with items still inside. Without the feature every function here
//! is an empty inline stub.

#[cfg(feature = "fibre_telemetry")]
pub mod enabled {
  //! Collector backed by a global, mutex-guarded store.

  use std::collections::HashMap;
  use std::fmt;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::thread::{self, ThreadId};
  use std::time::Instant;

  use parking_lot::Mutex;

  static NEXT_EVENT_SEQUENCE_ID: AtomicUsize = AtomicUsize::new(0);

  /// A single recorded event.
  #[derive(Clone)]
  pub struct TelemetryEvent {
    /// Global sequence number across all events.
    pub seq_id: usize,
    /// When the event was recorded.
    pub timestamp: Instant,
    /// Thread that recorded the event.
    pub os_thread_id: ThreadId,
    /// Optional numeric payload, such as a capacity or an item count.
    pub value: Option<usize>,
    /// Code location, e.g. `spsc::shared::drop`.
    pub location: String,
    /// Event kind, e.g. `RingCreated`.
    pub event_type: String,
    /// Optional free-form details.
    pub message: Option<String>,
  }

  impl fmt::Debug for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("TelemetryEvent")
        .field("seq", &self.seq_id)
        .field("os_tid", &self.os_thread_id)
        .field("value", &self.value)
        .field("loc", &self.location)
        .field("evt", &self.event_type)
        .field("msg", &self.message.as_deref().unwrap_or(""))
        .finish()
    }
  }

  // (location, counter_name). Static names keep the hot counter path free of
  // allocation once a key has been inserted.
  type CounterKey = (&'static str, &'static str);

  struct CollectorData {
    events: Vec<TelemetryEvent>,
    counters: HashMap<CounterKey, usize>,
    start_time: Instant,
  }

  impl CollectorData {
    fn new() -> Self {
      CollectorData {
        events: Vec::new(),
        counters: HashMap::new(),
        start_time: Instant::now(),
      }
    }
  }

  lazy_static::lazy_static! {
    static ref GLOBAL_COLLECTOR: Mutex<CollectorData> = Mutex::new(CollectorData::new());
  }

  /// Records an event.
  pub fn log_event_fn(
    value: Option<usize>,
    location: &'static str,
    event_type: &'static str,
    message: Option<String>,
  ) {
    let event = TelemetryEvent {
      seq_id: NEXT_EVENT_SEQUENCE_ID.fetch_add(1, Ordering::Relaxed),
      timestamp: Instant::now(),
      os_thread_id: thread::current().id(),
      value,
      location: location.to_string(),
      event_type: event_type.to_string(),
      message,
    };
    GLOBAL_COLLECTOR.lock().events.push(event);
  }

  /// Bumps the named counter at `location` by one.
  pub fn increment_counter_fn(location: &'static str, counter_name: &'static str) {
    *GLOBAL_COLLECTOR
      .lock()
      .counters
      .entry((location, counter_name))
      .or_insert(0) += 1;
  }

  /// Current value of a counter, zero if it was never bumped.
  pub fn counter_value_fn(location: &'static str, counter_name: &'static str) -> usize {
    GLOBAL_COLLECTOR
      .lock()
      .counters
      .get(&(location, counter_name))
      .copied()
      .unwrap_or(0)
  }

  /// Snapshot of all recorded events in sequence order.
  pub fn events_fn() -> Vec<TelemetryEvent> {
    let mut events = GLOBAL_COLLECTOR.lock().events.clone();
    events.sort_by_key(|e| e.seq_id);
    events
  }

  /// Prints every event and counter to stdout.
  pub fn print_telemetry_report_fn() {
    let collector = GLOBAL_COLLECTOR.lock();
    println!("\n--- Fibre Ring Telemetry Report (Feature: fibre_telemetry) ---");

    if collector.events.is_empty() {
      println!("\n[Events] No detailed events recorded.");
    } else {
      println!("\n[Events] Recorded Events ({}):", collector.events.len());
      let mut sorted_events = collector.events.clone();
      sorted_events.sort_by_key(|e| e.seq_id);

      for event in sorted_events.iter() {
        let since_start = event.timestamp.duration_since(collector.start_time);
        println!(
          "  +{:<10.6}s [Seq:{:<5}] TID:{:<12} Value:{:<8} Loc:{:<28} Evt:{:<20} Msg: {}",
          since_start.as_secs_f64(),
          event.seq_id,
          format!("{:?}", event.os_thread_id),
          event.value.map_or_else(|| "N/A".to_string(), |v| v.to_string()),
          event.location,
          event.event_type,
          event.message.as_deref().unwrap_or("")
        );
      }
    }

    if collector.counters.is_empty() {
      println!("\n[Counters] No counters recorded.");
    } else {
      println!("\n[Counters] Recorded Counters ({}):", collector.counters.len());
      let mut sorted_counters: Vec<_> = collector.counters.iter().collect();
      sorted_counters.sort_by_key(|(k, _v)| *k);
      for ((loc, name), count) in sorted_counters {
        println!("  Loc:{:<28} Counter:{:<20} Value: {}", loc, name, count);
      }
    }
    println!("\n--- End of Telemetry Report ---");
  }

  /// Discards all events and counters.
  pub fn clear_telemetry_fn() {
    let mut collector = GLOBAL_COLLECTOR.lock();
    collector.events.clear();
    collector.counters.clear();
    collector.start_time = Instant::now();
    NEXT_EVENT_SEQUENCE_ID.store(0, Ordering::Relaxed);
  }
}

#[cfg(not(feature = "fibre_telemetry"))]
pub mod disabled {
  //! No-op stand-ins used when the `fibre_telemetry` feature is off.

  /// No-op.
  #[inline(always)]
  pub fn log_event_fn(
    _value: Option<usize>,
    _location: &'static str,
    _event_type: &'static str,
    _message: Option<String>,
  ) {
  }
  /// No-op.
  #[inline(always)]
  pub fn increment_counter_fn(_location: &'static str, _counter_name: &'static str) {}
  /// Always zero.
  #[inline(always)]
  pub fn counter_value_fn(_location: &'static str, _counter_name: &'static str) -> usize {
    0
  }
  /// No-op.
  #[inline(always)]
  pub fn print_telemetry_report_fn() {}
  /// No-op.
  #[inline(always)]
  pub fn clear_telemetry_fn() {}
}

#[cfg(feature = "fibre_telemetry")]
pub use enabled::{
  clear_telemetry_fn as clear_telemetry, counter_value_fn as counter_value,
  events_fn as events, increment_counter_fn as increment_counter, log_event_fn as log_event,
  print_telemetry_report_fn as print_telemetry_report, TelemetryEvent,
};

#[cfg(not(feature = "fibre_telemetry"))]
pub use disabled::{
  clear_telemetry_fn as clear_telemetry, counter_value_fn as counter_value,
  increment_counter_fn as increment_counter, log_event_fn as log_event,
  print_telemetry_report_fn as print_telemetry_report,
};

/// Location and counter names the ring reports under.
pub mod names {
  /// `try_enqueue` call sites.
  pub const ENQUEUE: &str = "spsc::try_enqueue";
  /// `try_dequeue` call sites.
  pub const DEQUEUE: &str = "spsc::try_dequeue";
  /// Ring construction and teardown.
  pub const LIFECYCLE: &str = "spsc::ring";
  /// Counter bumped when an enqueue finds no free slot.
  pub const FULL: &str = "full";
  /// Counter bumped when a dequeue finds nothing published.
  pub const EMPTY: &str = "empty";
}
