use fibre_ring::builder::DEFAULT_CAPACITY;
use fibre_ring::{CapacityError, RingBuilder, RingConfig};

#[test]
fn config_loads_from_yaml() {
  let config: RingConfig = serde_yaml::from_str("capacity: 4096\n").unwrap();
  assert_eq!(config, RingConfig { capacity: 4096 });

  let (p, c) = RingBuilder::from_config(&config)
    .build_split::<u64>()
    .unwrap();
  assert_eq!(p.capacity(), 4096);
  assert_eq!(c.capacity(), 4096);
}

#[test]
fn missing_capacity_uses_default() {
  let config: RingConfig = serde_yaml::from_str("{}").unwrap();
  assert_eq!(config.capacity, DEFAULT_CAPACITY);
}

#[test]
fn unknown_fields_are_rejected() {
  let res: Result<RingConfig, _> = serde_yaml::from_str("capacity: 8\nproducers: 2\n");
  assert!(res.is_err());
}

#[test]
fn invalid_capacity_from_config_fails_build() {
  let config: RingConfig = serde_yaml::from_str("capacity: 1000").unwrap();
  let err = RingBuilder::from_config(&config).build::<u8>().unwrap_err();
  assert_eq!(err, CapacityError::NotPowerOfTwo(1000));
}

#[test]
fn config_round_trips_through_yaml() {
  let config = RingBuilder::new().capacity_for_items(300).config();
  let text = serde_yaml::to_string(&config).unwrap();
  assert!(text.contains("capacity: 512"));
}
