use super::Demand;

#[test]
fn none_has_nothing_available() {
  assert!(!Demand::none().is_available());
}

#[test]
fn add_accumulates_finite_demand() {
  let demand = Demand::none().add(2).add(3);
  assert_eq!(demand, Demand::Finite(5));
}

#[test]
fn add_saturates_into_unbounded() {
  let demand = Demand::Finite(u64::MAX).add(1);
  assert_eq!(demand, Demand::Unbounded);
}

#[test]
fn consume_one_decrements_until_exhausted() {
  let mut demand = Demand::Finite(2);
  assert!(demand.consume_one());
  assert!(demand.consume_one());
  assert!(!demand.consume_one());
  assert_eq!(demand, Demand::Finite(0));
}

#[test]
fn unbounded_demand_never_exhausts() {
  let mut demand = Demand::Unbounded;
  assert!(demand.consume_one());
  assert_eq!(demand, Demand::Unbounded);
}
