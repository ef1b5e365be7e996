extern crate std;

use alloc::{sync::Arc, vec::Vec};
use std::thread;

use crate::core::{Demand, DemandCounter};

#[test]
fn add_accumulates_and_returns_previous() {
  let counter = DemandCounter::new();
  assert_eq!(counter.add(3), Demand::Finite(0));
  assert_eq!(counter.add(4), Demand::Finite(3));
  assert_eq!(counter.current(), Demand::Finite(7));
}

#[test]
fn requesting_max_twice_stays_unbounded() {
  let counter = DemandCounter::new();
  counter.add(u64::MAX);
  counter.add(u64::MAX);
  assert_eq!(counter.current(), Demand::Unbounded);
}

#[test]
fn near_max_additions_saturate() {
  let counter = DemandCounter::new();
  counter.add(u64::MAX - 1);
  counter.add(10);
  assert_eq!(counter.current(), Demand::Unbounded);
}

#[test]
fn produced_subtracts_finite_demand_only() {
  let counter = DemandCounter::new();
  counter.add(5);
  assert_eq!(counter.produced(2), Demand::Finite(3));

  let unbounded = DemandCounter::new();
  unbounded.add(u64::MAX);
  assert_eq!(unbounded.produced(100), Demand::Unbounded);
}

#[test]
fn concurrent_additions_are_not_lost() {
  let counter = Arc::new(DemandCounter::new());
  let handles: Vec<_> = (0..4)
    .map(|_| {
      let counter = counter.clone();
      thread::spawn(move || {
        for _ in 0..1_000 {
          counter.add(1);
        }
      })
    })
    .collect();
  for handle in handles {
    handle.join().expect("join");
  }
  assert_eq!(counter.current(), Demand::Finite(4_000));
}
