use std::{
  sync::{Arc, Barrier},
  thread,
};

use fraktor_reactive_rs::core::{
  EmptySubscription, FanIn, Map, ProtocolViolation, Publisher, SerializedSubscriber, SkipUntil, StreamError, Subscriber,
  testing::{TestSinkProbe, TestSourceProbe},
};

const PARTICIPANTS: u32 = 4;
const ITEMS_PER_PARTICIPANT: u32 = 500;

fn as_publisher(source: &Arc<TestSourceProbe<u32>>) -> Arc<dyn Publisher<u32>> {
  source.clone()
}

#[test]
fn merge_from_many_threads_keeps_per_participant_order() {
  let sources: Vec<Arc<TestSourceProbe<u32>>> = (0..PARTICIPANTS).map(|_| TestSourceProbe::new()).collect();
  let fan_in = FanIn::merge(sources.iter().map(as_publisher).collect(), PARTICIPANTS as usize).expect("valid");
  let sink = TestSinkProbe::<u32>::unbounded();
  fan_in.subscribe(sink.clone());

  let barrier = Arc::new(Barrier::new(sources.len()));
  let handles: Vec<_> = sources
    .iter()
    .enumerate()
    .map(|(lane, source)| {
      let source = source.clone();
      let barrier = barrier.clone();
      thread::spawn(move || {
        barrier.wait();
        for sequence in 0..ITEMS_PER_PARTICIPANT {
          source.emit(lane as u32 * 10_000 + sequence);
        }
        source.complete();
      })
    })
    .collect();
  for handle in handles {
    handle.join().expect("emitter thread");
  }

  let items = sink.items();
  assert!(sink.is_completed());
  assert!(!sink.has_overlapping_signals());
  assert_eq!(items.len(), (PARTICIPANTS * ITEMS_PER_PARTICIPANT) as usize);
  for lane in 0..PARTICIPANTS {
    let lane_items: Vec<u32> = items.iter().copied().filter(|item| item / 10_000 == lane).collect();
    let expected: Vec<u32> = (0..ITEMS_PER_PARTICIPANT).map(|sequence| lane * 10_000 + sequence).collect();
    assert_eq!(lane_items, expected);
  }
}

#[test]
fn serialized_subscriber_never_overlaps_concurrent_emitters() {
  let sink = TestSinkProbe::<u32>::unbounded();
  let serialized = Arc::new(SerializedSubscriber::new(sink.clone()));
  serialized.on_subscribe(Arc::new(EmptySubscription));

  let barrier = Arc::new(Barrier::new(4));
  let handles: Vec<_> = (0..4_u32)
    .map(|lane| {
      let serialized = serialized.clone();
      let barrier = barrier.clone();
      thread::spawn(move || {
        barrier.wait();
        for sequence in 0..1_000 {
          serialized.on_next(lane * 10_000 + sequence);
        }
        serialized.on_complete();
      })
    })
    .collect();
  for handle in handles {
    handle.join().expect("emitter thread");
  }

  assert!(sink.is_completed());
  assert!(!sink.has_overlapping_signals());
  assert_eq!(sink.signals_after_terminal(), 0);
}

#[test]
fn gate_opened_from_another_thread_passes_a_suffix() {
  let main = TestSourceProbe::<u32>::new();
  let other = TestSourceProbe::<()>::new();
  let sink = TestSinkProbe::<u32>::unbounded();
  SkipUntil::new(main.clone(), other.clone()).subscribe(sink.clone());

  let barrier = Arc::new(Barrier::new(2));
  let emitter = {
    let main = main.clone();
    let barrier = barrier.clone();
    thread::spawn(move || {
      barrier.wait();
      for item in 0..5_000_u32 {
        main.emit(item);
      }
    })
  };
  barrier.wait();
  other.emit(());
  emitter.join().expect("emitter thread");
  main.complete();

  let items = sink.items();
  assert!(sink.is_completed());
  if let Some(first) = items.first().copied() {
    let expected: Vec<u32> = (first..5_000).collect();
    assert_eq!(items, expected);
  }
  assert!(other.is_cancelled());
}

#[test]
fn concurrent_cancellation_reaches_each_participant_once() {
  let sources: Vec<Arc<TestSourceProbe<u32>>> = (0..3).map(|_| TestSourceProbe::new()).collect();
  let fan_in = FanIn::merge(sources.iter().map(as_publisher).collect(), 3).expect("valid");
  let sink = TestSinkProbe::<u32>::new(1);
  fan_in.subscribe(sink.clone());

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let sink = sink.clone();
      thread::spawn(move || sink.cancel())
    })
    .collect();
  for handle in handles {
    handle.join().expect("cancelling thread");
  }

  for source in &sources {
    assert_eq!(source.subscription().cancel_calls(), 1);
  }
  assert!(!sink.is_terminated());
}

#[test]
fn zero_request_from_another_thread_never_overlaps_items() {
  let source = TestSourceProbe::<u32>::new();
  let doubled = Map::new(as_publisher(&source), |item: u32| item * 2);
  let sink = TestSinkProbe::<u32>::unbounded();
  doubled.subscribe(sink.clone());
  let start = Arc::new(Barrier::new(2));

  let emitter = {
    let source = source.clone();
    let start = start.clone();
    thread::spawn(move || {
      start.wait();
      for item in 0..ITEMS_PER_PARTICIPANT {
        source.emit(item);
      }
    })
  };
  start.wait();
  sink.request(0);
  emitter.join().expect("emitting thread");

  assert!(!sink.has_overlapping_signals());
  assert_eq!(sink.signals_after_terminal(), 0);
  assert_eq!(sink.failure(), Some(StreamError::ProtocolViolation(ProtocolViolation::NonPositiveRequest)));
  assert!(source.is_cancelled());
}
