use alloc::{sync::Arc, vec, vec::Vec};

use crate::core::{
  FanIn, InlineExecutor, Publisher, PublisherExt, StreamError,
  testing::{SequenceSource, TestSinkProbe},
};

#[test]
fn operators_compose_into_a_pipeline() {
  let participants: Vec<Arc<dyn Publisher<i32>>> =
    vec![SequenceSource::new(vec![1, 2]), SequenceSource::new(vec![3, 4])];
  let Ok(merged) = FanIn::concatenate(participants) else {
    panic!("valid participants");
  };
  let pipeline = merged
    .skip_until::<()>(SequenceSource::new(vec![()]))
    .map(|item: i32| item * 2)
    .try_map(|item| if item > 6 { Err(StreamError::upstream("too large")) } else { Ok(item) })
    .emit_on(Arc::new(InlineExecutor::new()));
  let sink = TestSinkProbe::<i32>::unbounded();

  pipeline.subscribe(sink.clone());

  assert_eq!(sink.items(), [2, 4, 6]);
  assert_eq!(sink.failure(), Some(StreamError::upstream("too large")));
}

#[test]
fn ignore_elements_keeps_only_the_terminal() {
  let sink = TestSinkProbe::<&str>::new(1);

  SequenceSource::new(vec!["a", "b"]).ignore_elements().subscribe(sink.clone());

  assert_eq!(sink.item_count(), 0);
  assert!(sink.is_completed());
}
