use alloc::{boxed::Box, sync::Arc, vec};
use core::time::Duration;

use super::TokioProcessor;
use crate::core::{
  testing::{TestSubscriberProbe, TestUpstreamProbe},
  ProcessorSettings, StreamError, Subscriber, TransformStage,
};

async fn wait_until(check: impl Fn() -> bool) {
  for _ in 0..500 {
    if check() {
      return;
    }
    tokio::time::sleep(Duration::from_millis(2)).await;
  }
  panic!("condition not reached in time");
}

#[test]
fn spawn_outside_a_runtime_is_rejected() {
  let result = TokioProcessor::<u32, u32>::spawn(ProcessorSettings::new(), Box::new(TransformStage::new(Ok)));
  assert!(matches!(result, Err(StreamError::ExecutorUnavailable)));
}

#[tokio::test]
async fn identity_stream_flows_end_to_end() {
  let processor =
    TokioProcessor::<u32, u32>::spawn(ProcessorSettings::new(), Box::new(TransformStage::new(Ok))).expect("spawn");
  let probe = TestSubscriberProbe::new();
  processor.publisher().subscribe(Arc::new(probe.clone()));
  let upstream = TestUpstreamProbe::new();
  processor.subscriber().on_subscribe(Arc::new(upstream.clone()));
  {
    let probe = probe.clone();
    wait_until(move || probe.has_subscription()).await;
  }
  {
    let upstream = upstream.clone();
    wait_until(move || upstream.total_requested() >= 4).await;
  }
  probe.request(3);
  for element in 1_u32..=3 {
    processor.subscriber().on_next(element);
  }
  {
    let probe = probe.clone();
    wait_until(move || probe.received_count() == 3).await;
  }
  processor.subscriber().on_complete();
  {
    let probe = probe.clone();
    wait_until(move || probe.is_completed()).await;
  }
  processor.join().await;
  assert_eq!(probe.received(), vec![1, 2, 3]);
  assert_eq!(probe.terminal_count(), 1);
}

#[tokio::test]
async fn transformed_elements_reach_the_subscriber() {
  let stage = TransformStage::new(|element: u32| Ok(element * 2));
  let processor = TokioProcessor::<u32, u32>::spawn(ProcessorSettings::new(), Box::new(stage)).expect("spawn");
  let probe = TestSubscriberProbe::new();
  processor.publisher().subscribe(Arc::new(probe.clone()));
  let upstream = TestUpstreamProbe::new();
  processor.subscriber().on_subscribe(Arc::new(upstream));
  {
    let probe = probe.clone();
    wait_until(move || probe.has_subscription()).await;
  }
  probe.request(2);
  processor.subscriber().on_next(3);
  processor.subscriber().on_next(4);
  {
    let probe = probe.clone();
    wait_until(move || probe.received_count() == 2).await;
  }
  assert_eq!(probe.received(), vec![6, 8]);
}

#[tokio::test]
async fn shutdown_fails_live_subscribers_abruptly() {
  let processor =
    TokioProcessor::<u32, u32>::spawn(ProcessorSettings::new(), Box::new(TransformStage::new(Ok))).expect("spawn");
  let probe = TestSubscriberProbe::new();
  processor.publisher().subscribe(Arc::new(probe.clone()));
  let upstream = TestUpstreamProbe::new();
  processor.subscriber().on_subscribe(Arc::new(upstream.clone()));
  {
    let probe = probe.clone();
    wait_until(move || probe.has_subscription()).await;
  }
  processor.shutdown();
  {
    let probe = probe.clone();
    wait_until(move || probe.error().is_some()).await;
  }
  assert_eq!(probe.error(), Some(StreamError::AbruptTermination));
  assert!(upstream.is_cancelled());
  processor.join().await;
}
