use alloc::{sync::Arc, vec, vec::Vec};

use spin::{Mutex, Once};

use crate::core::{
  FailureMode, FanIn, FanInConfig, ProtocolViolation, Publisher, Signal, StreamError, Subscriber, Subscription,
  testing::{SequenceSource, TestSinkProbe, TestSourceProbe},
};

fn seq(items: Vec<i32>) -> Arc<dyn Publisher<i32>> {
  SequenceSource::new(items)
}

fn failing(items: Vec<i32>, message: &'static str) -> Arc<dyn Publisher<i32>> {
  SequenceSource::failing(items, StreamError::upstream(message))
}

fn probe(source: &Arc<TestSourceProbe<i32>>) -> Arc<dyn Publisher<i32>> {
  source.clone()
}

fn collecting(concurrency: usize) -> FanInConfig {
  FanInConfig::default().with_concurrency(concurrency).with_failure_mode(FailureMode::CollectFailures)
}

#[test]
fn concatenate_drains_participants_in_order() {
  let Ok(fan_in) = FanIn::concatenate(vec![seq(vec![1, 2]), seq(vec![3]), seq(vec![])]) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();

  fan_in.subscribe(sink.clone());

  assert_eq!(sink.items(), [1, 2, 3]);
  assert!(sink.is_completed());
}

#[test]
fn concatenate_activates_the_next_participant_only_after_completion() {
  let first = TestSourceProbe::new();
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::concatenate(vec![probe(&first), probe(&second)]) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(1);
  fan_in.subscribe(sink.clone());

  first.emit(1);
  assert_eq!(second.subscribe_count(), 0);

  first.complete();
  assert_eq!(second.subscribe_count(), 1);
  second.emit(2);
  second.complete();

  assert_eq!(sink.items(), [1]);
  assert!(!sink.is_terminated());
  sink.request(1);
  assert_eq!(sink.items(), [1, 2]);
  assert!(sink.is_completed());
}

#[test]
fn merge_preserves_per_participant_order() {
  let first = TestSourceProbe::new();
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::merge(vec![probe(&first), probe(&second)], 2) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();
  fan_in.subscribe(sink.clone());

  first.emit(1);
  second.emit(3);
  first.emit(2);
  second.emit(4);
  first.complete();
  assert!(!sink.is_terminated());
  second.complete();

  assert_eq!(sink.items(), [1, 3, 2, 4]);
  assert!(sink.is_completed());
}

#[test]
fn merge_respects_the_concurrency_limit() {
  let sources: Vec<Arc<TestSourceProbe<i32>>> = (0..3).map(|_| TestSourceProbe::new()).collect();
  let Ok(fan_in) = FanIn::merge(sources.iter().map(probe).collect(), 2) else {
    panic!("valid participants");
  };
  fan_in.subscribe(TestSinkProbe::<i32>::unbounded());

  assert_eq!(sources[0].subscribe_count(), 1);
  assert_eq!(sources[1].subscribe_count(), 1);
  assert_eq!(sources[2].subscribe_count(), 0);

  sources[1].complete();
  assert_eq!(sources[2].subscribe_count(), 1);
}

#[test]
fn collect_failures_forwards_items_then_a_composite() {
  let Ok(fan_in) = FanIn::new(vec![failing(vec![], "E1"), seq(vec![5])], collecting(2)) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();

  fan_in.subscribe(sink.clone());

  assert_eq!(sink.items(), [5]);
  let Some(StreamError::Composite(composite)) = sink.failure() else {
    panic!("expected composite failure");
  };
  assert_eq!(composite.causes(), [StreamError::upstream("E1")]);
}

#[test]
fn collect_failures_keeps_occurrence_order() {
  let first = TestSourceProbe::new();
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::new(vec![probe(&first), probe(&second)], collecting(2)) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();
  fan_in.subscribe(sink.clone());

  second.fail(StreamError::upstream("second"));
  assert!(!sink.is_terminated());
  first.emit(1);
  first.fail(StreamError::upstream("first"));

  assert_eq!(sink.items(), [1]);
  let failure = sink.failure();
  let causes = failure.as_ref().and_then(StreamError::as_composite).map(|composite| composite.causes());
  assert_eq!(causes, Some([StreamError::upstream("second"), StreamError::upstream("first")].as_slice()));
}

#[test]
fn collecting_concatenation_continues_after_a_failure() {
  let Ok(fan_in) = FanIn::new(vec![failing(vec![1], "E1"), seq(vec![9])], collecting(1)) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();

  fan_in.subscribe(sink.clone());

  assert_eq!(sink.items(), [1, 9]);
  assert!(sink.failure().and_then(|error| error.as_composite().cloned()).is_some());
}

#[test]
fn fail_fast_cancels_the_other_participants() {
  let first = TestSourceProbe::new();
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::merge(vec![probe(&first), probe(&second)], 2) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(0);
  fan_in.subscribe(sink.clone());

  second.emit(7);
  first.fail(StreamError::upstream("E1"));
  second.emit(8);

  assert_eq!(sink.item_count(), 0);
  assert_eq!(sink.failure(), Some(StreamError::upstream("E1")));
  assert!(second.is_cancelled());
  assert_eq!(sink.signals_after_terminal(), 0);
}

#[test]
fn fail_fast_concatenation_stops_at_the_first_failure() {
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::concatenate(vec![failing(vec![], "E1"), probe(&second)]) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::unbounded();

  fan_in.subscribe(sink.clone());

  assert_eq!(sink.item_count(), 0);
  assert_eq!(sink.failure(), Some(StreamError::upstream("E1")));
  assert_eq!(second.subscribe_count(), 0);
}

#[test]
fn empty_participant_list_completes_immediately() {
  let Ok(fan_in) = FanIn::<i32>::merge(Vec::new(), 4) else {
    panic!("empty list is valid");
  };
  let sink = TestSinkProbe::new(0);

  fan_in.subscribe(sink.clone());

  assert!(sink.is_subscribed());
  assert!(sink.is_completed());
}

#[test]
fn invalid_construction_is_rejected_synchronously() {
  let shared = seq(vec![1]);

  assert!(matches!(
    FanIn::merge(vec![seq(vec![1])], 0),
    Err(StreamError::InvalidArgument { name: "concurrency", .. })
  ));
  assert!(matches!(
    FanIn::new(vec![seq(vec![1])], FanInConfig::default().with_prefetch(0)),
    Err(StreamError::InvalidArgument { name: "prefetch", .. })
  ));
  assert!(matches!(
    FanIn::concatenate(vec![shared.clone(), shared]),
    Err(StreamError::InvalidArgument { name: "participants", .. })
  ));
}

#[test]
fn delivery_never_exceeds_downstream_demand() {
  let source = TestSourceProbe::new();
  let config = FanInConfig::default().with_concurrency(1).with_prefetch(4);
  let Ok(fan_in) = FanIn::new(vec![probe(&source)], config) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(3);
  fan_in.subscribe(sink.clone());
  assert_eq!(source.requested(), 4);

  for item in 1..=4 {
    source.emit(item);
  }

  assert_eq!(sink.items(), [1, 2, 3]);
  assert_eq!(source.requested(), 7);
  sink.request(1);
  assert_eq!(sink.items(), [1, 2, 3, 4]);
}

#[test]
fn completion_waits_for_buffered_items() {
  let Ok(fan_in) = FanIn::merge(vec![seq(vec![1, 2]), seq(vec![])], 2) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(1);

  fan_in.subscribe(sink.clone());
  assert_eq!(sink.items(), [1]);
  assert!(!sink.is_terminated());

  sink.request(1);
  assert_eq!(sink.items(), [1, 2]);
  assert!(sink.is_completed());
}

#[test]
fn cancel_reaches_every_active_participant_once() {
  let first = TestSourceProbe::new();
  let second = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::merge(vec![probe(&first), probe(&second)], 2) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(1);
  fan_in.subscribe(sink.clone());

  sink.cancel();
  sink.cancel();
  first.emit(1);

  assert_eq!(first.subscription().cancel_calls(), 1);
  assert_eq!(second.subscription().cancel_calls(), 1);
  assert_eq!(sink.item_count(), 0);
  assert!(!sink.is_terminated());
}

#[test]
fn zero_request_fails_with_a_protocol_violation() {
  let source = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::concatenate(vec![probe(&source)]) else {
    panic!("valid participants");
  };
  let sink = TestSinkProbe::new(0);
  fan_in.subscribe(sink.clone());

  sink.request(0);

  assert!(source.is_cancelled());
  assert_eq!(sink.failure(), Some(StreamError::ProtocolViolation(ProtocolViolation::NonPositiveRequest)));
}

/// Subscriber that cancels from inside its first `on_next`.
struct CancelOnItem {
  initial:      u64,
  subscription: Once<Arc<dyn Subscription>>,
  events:       Mutex<Vec<&'static str>>,
}

impl CancelOnItem {
  fn new(initial: u64) -> Arc<Self> {
    Arc::new(Self { initial, subscription: Once::new(), events: Mutex::new(Vec::new()) })
  }

  fn request(&self, amount: u64) {
    if let Some(subscription) = self.subscription.get() {
      subscription.request(amount);
    }
  }

  fn events(&self) -> Vec<&'static str> {
    self.events.lock().clone()
  }
}

impl Subscriber<i32> for CancelOnItem {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let subscription = self.subscription.call_once(|| subscription).clone();
    if self.initial > 0 {
      subscription.request(self.initial);
    }
  }

  fn on_signal(&self, signal: Signal<i32>) {
    match signal {
      | Signal::Item(_) => {
        self.events.lock().push("item");
        if let Some(subscription) = self.subscription.get() {
          subscription.cancel();
        }
        self.events.lock().push("cancelled");
      },
      | Signal::Failure(_) => self.events.lock().push("failure"),
      | Signal::Completion => self.events.lock().push("completion"),
    }
  }
}

#[test]
fn cancel_from_on_next_suppresses_completion() {
  let Ok(fan_in) = FanIn::concatenate(vec![seq(vec![1])]) else {
    panic!("valid participants");
  };
  let subscriber = CancelOnItem::new(u64::MAX);

  fan_in.subscribe(subscriber.clone());

  assert_eq!(subscriber.events(), ["item", "cancelled"]);
}

#[test]
fn cancel_from_on_next_suppresses_collected_failures() {
  let Ok(fan_in) = FanIn::new(vec![failing(vec![], "E1"), seq(vec![5])], collecting(2)) else {
    panic!("valid participants");
  };
  let subscriber = CancelOnItem::new(u64::MAX);

  fan_in.subscribe(subscriber.clone());

  assert_eq!(subscriber.events(), ["item", "cancelled"]);
}

#[test]
fn cancel_from_on_next_with_a_finished_participant_stays_silent() {
  let source = TestSourceProbe::new();
  let Ok(fan_in) = FanIn::concatenate(vec![probe(&source)]) else {
    panic!("valid participants");
  };
  let subscriber = CancelOnItem::new(0);
  fan_in.subscribe(subscriber.clone());
  source.emit(1);
  source.complete();

  subscriber.request(1);

  assert_eq!(subscriber.events(), ["item", "cancelled"]);
  assert!(source.is_cancelled());
}
