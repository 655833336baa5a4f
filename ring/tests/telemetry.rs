use fibre_ring::spsc;
use fibre_ring::telemetry::{self, names};

use serial_test::serial;

#[test]
#[serial]
fn full_and_empty_outcomes_are_counted() {
  telemetry::clear_telemetry();

  let (mut p, mut c) = spsc::ring_buffer::<u32>(2).unwrap();
  assert_eq!(c.try_dequeue(), None);
  p.try_enqueue(1).unwrap();
  assert!(p.try_enqueue(2).is_err());
  assert!(p.try_enqueue(3).is_err());
  assert_eq!(c.try_dequeue(), Some(1));

  assert_eq!(telemetry::counter_value(names::ENQUEUE, names::FULL), 2);
  assert_eq!(telemetry::counter_value(names::DEQUEUE, names::EMPTY), 1);
}

#[test]
#[serial]
fn lifecycle_events_are_recorded() {
  telemetry::clear_telemetry();

  {
    let (mut p, _c) = spsc::ring_buffer::<String>(8).unwrap();
    p.try_enqueue("left behind".to_string()).unwrap();
  }

  let events = telemetry::events();
  let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
  assert_eq!(kinds, vec!["RingCreated", "RingDroppedWithItems"]);
  assert_eq!(events[0].value, Some(8));
  assert_eq!(events[1].value, Some(1));

  telemetry::print_telemetry_report();
  telemetry::clear_telemetry();
  assert!(telemetry::events().is_empty());
}

#[test]
#[serial]
fn full_counter_is_exact_while_reports_print() {
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::Arc;
  use std::thread;

  telemetry::clear_telemetry();
  let (mut p, _c) = spsc::ring_buffer::<u32>(2).unwrap();
  p.try_enqueue(0).unwrap();

  let stop = Arc::new(AtomicBool::new(false));
  let reporter = {
    let stop = Arc::clone(&stop);
    thread::spawn(move || {
      while !stop.load(Ordering::Relaxed) {
        telemetry::print_telemetry_report();
        thread::yield_now();
      }
    })
  };

  for i in 0..2_000u32 {
    assert_eq!(p.try_enqueue(i).unwrap_err().into_inner(), i);
  }
  stop.store(true, Ordering::Relaxed);
  reporter.join().unwrap();

  assert_eq!(telemetry::counter_value(names::ENQUEUE, names::FULL), 2_000);
  telemetry::clear_telemetry();
}

#[test]
#[serial]
fn custom_events_take_static_names() {
  const LOCATION: &str = "app::pipeline";
  telemetry::clear_telemetry();
  telemetry::log_event(Some(3), LOCATION, "PipelineStarted", Some("3 sensors".to_string()));

  let events = telemetry::events();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].location, LOCATION);
  assert_eq!(events[0].event_type, "PipelineStarted");
  assert_eq!(events[0].message.as_deref(), Some("3 sensors"));
  telemetry::clear_telemetry();
}
