use alloc::{sync::Arc, vec};

use crate::core::{
  Map, Publisher, StreamError,
  testing::{SequenceSource, TestSinkProbe, TestSourceProbe},
};

#[test]
fn transforms_every_item() {
  let map = Map::new(SequenceSource::new(vec![1, 2, 3]), |item: i32| item * 10);
  let probe = TestSinkProbe::unbounded();

  map.subscribe(probe.clone());

  assert_eq!(probe.items(), [10, 20, 30]);
  assert!(probe.is_completed());
}

#[test]
fn honours_downstream_demand() {
  let map = Map::new(SequenceSource::new(vec![1, 2, 3]), |item: i32| item + 1);
  let probe = TestSinkProbe::new(2);

  map.subscribe(probe.clone());
  assert_eq!(probe.items(), [2, 3]);
  assert!(!probe.is_terminated());

  probe.request(1);
  assert_eq!(probe.items(), [2, 3, 4]);
  assert!(probe.is_completed());
}

#[test]
fn mapper_failure_cancels_upstream_and_fails_once() {
  let source = TestSourceProbe::new();
  let map = Map::try_new(source.clone(), |item: i32| {
    if item == 2 { Err(StreamError::upstream("cannot convert 2")) } else { Ok(item) }
  });
  let probe = TestSinkProbe::unbounded();
  map.subscribe(probe.clone());

  source.emit(1);
  source.emit(2);
  source.emit(3);
  source.complete();

  assert_eq!(probe.items(), [1]);
  assert_eq!(probe.failure(), Some(StreamError::upstream("cannot convert 2")));
  assert!(source.is_cancelled());
  assert_eq!(probe.signals_after_terminal(), 0);
}

#[test]
fn downstream_cancel_reaches_upstream() {
  let source = TestSourceProbe::new();
  let map: Map<i32, i32> = Map::new(source.clone(), |item| item);
  let probe = TestSinkProbe::new(1);
  map.subscribe(probe.clone());

  probe.cancel();
  probe.cancel();
  source.emit(1);

  assert_eq!(source.subscription().cancel_calls(), 1);
  assert!(probe.items().is_empty());
}

#[test]
fn upstream_failure_passes_through() {
  let map = Map::new(SequenceSource::failing(vec![1], StreamError::upstream("boom")), |item: i32| item);
  let probe: Arc<TestSinkProbe<i32>> = TestSinkProbe::unbounded();

  map.subscribe(probe.clone());

  assert_eq!(probe.items(), [1]);
  assert_eq!(probe.failure(), Some(StreamError::upstream("boom")));
}
