use alloc::{boxed::Box, sync::Arc, vec};

use super::ProcessorCell;
use crate::core::{
  processor_settings::ProcessorSettings, processor_state::ProcessorState, stream_error::StreamError,
  subscriber::Subscriber, testing::TestSubscriberProbe, testing::TestUpstreamProbe, transform_stage::TransformStage,
};

fn identity_cell() -> ProcessorCell<u32, u32> {
  ProcessorCell::new(ProcessorSettings::new(), Box::new(TransformStage::new(Ok))).expect("cell")
}

#[test]
fn construction_queues_the_publisher_exposure() {
  let mut cell = identity_cell();
  assert_eq!(cell.state(), ProcessorState::WaitingExposedPublisher);
  assert_eq!(cell.run_until_idle(), 1);
  assert_eq!(cell.state(), ProcessorState::WaitingForUpstream);
}

#[test]
fn invalid_settings_are_rejected_at_construction() {
  let settings = ProcessorSettings::new().with_max_input_buffer_size(10);
  let result = ProcessorCell::<u32, u32>::new(settings, Box::new(TransformStage::new(Ok)));
  assert!(matches!(result, Err(StreamError::InvalidSetting { .. })));
}

#[test]
fn chained_cells_propagate_elements_and_completion() {
  let mut first = identity_cell();
  let mut second = identity_cell();
  first.publisher().subscribe(Arc::new(second.subscriber()));
  let probe = TestSubscriberProbe::new();
  second.publisher().subscribe(Arc::new(probe.clone()));
  let upstream = TestUpstreamProbe::new();
  first.subscriber().on_subscribe(Arc::new(upstream.clone()));
  loop {
    let moved = first.run_until_idle() + second.run_until_idle();
    if moved == 0 {
      break;
    }
  }
  probe.request(3);
  loop {
    let moved = first.run_until_idle() + second.run_until_idle();
    if moved == 0 {
      break;
    }
  }
  for element in 1_u32..=3 {
    first.subscriber().on_next(element);
  }
  first.subscriber().on_complete();
  loop {
    let moved = first.run_until_idle() + second.run_until_idle();
    if moved == 0 {
      break;
    }
  }
  assert_eq!(probe.received(), vec![1, 2, 3]);
  assert!(probe.is_completed());
  assert_eq!(first.state(), ProcessorState::ShutDown);
  assert_eq!(second.state(), ProcessorState::ShutDown);
}

#[test]
fn abrupt_termination_fails_live_subscribers() {
  let mut cell = identity_cell();
  let probe = TestSubscriberProbe::new();
  cell.publisher().subscribe(Arc::new(probe.clone()));
  let upstream = TestUpstreamProbe::new();
  cell.subscriber().on_subscribe(Arc::new(upstream.clone()));
  let _ = cell.run_until_idle();
  cell.abrupt_terminate();
  assert_eq!(probe.error(), Some(StreamError::AbruptTermination));
  assert!(upstream.is_cancelled());
  assert_eq!(cell.state(), ProcessorState::ShutDown);
  assert_eq!(cell.shutdown_reason(), Some(&StreamError::AbruptTermination));
}
