use alloc::sync::Arc;

use super::TransferState;
use crate::core::{
  input_buffer::InputBuffer,
  output_fan_out::OutputFanOut,
  testing::{TestSubscriberProbe, TestUpstreamProbe},
};

fn buffers() -> (InputBuffer<u32>, OutputFanOut<u32>) {
  let inputs = InputBuffer::attached(Arc::new(TestUpstreamProbe::new()), 4, 4);
  let outputs = OutputFanOut::new(4, 4);
  (inputs, outputs)
}

#[test]
fn not_initialized_is_neither_ready_nor_completed() {
  let (inputs, outputs) = buffers();
  let state = TransferState::NotInitialized;
  assert!(!state.is_ready(&inputs, &outputs));
  assert!(!state.is_completed(&inputs, &outputs));
}

#[test]
fn needs_input_tracks_buffer_occupancy() {
  let (mut inputs, outputs) = buffers();
  let state = TransferState::NeedsInput;
  assert!(!state.is_ready(&inputs, &outputs));
  inputs.enqueue(1).expect("enqueue");
  assert!(state.is_ready(&inputs, &outputs));
  inputs.complete();
  assert!(state.is_executable(&inputs, &outputs));
  let _ = inputs.dequeue();
  assert!(state.is_completed(&inputs, &outputs));
}

#[test]
fn needs_demand_tracks_fan_out_readiness() {
  let (inputs, mut outputs) = buffers();
  let state = TransferState::NeedsDemand;
  assert!(!state.is_ready(&inputs, &outputs));
  let probe = TestSubscriberProbe::<u32>::new();
  let id = outputs.register_subscriber(Arc::new(probe)).expect("register");
  outputs.more_requested(id, 1);
  assert!(state.is_executable(&inputs, &outputs));
  outputs.unregister_subscription(id);
  assert!(state.is_completed(&inputs, &outputs));
}

#[test]
fn needs_demand_or_cancel_is_ready_once_downstream_closed() {
  let (inputs, mut outputs) = buffers();
  let state = TransferState::NeedsDemandOrCancel;
  assert!(!state.is_ready(&inputs, &outputs));
  let probe = TestSubscriberProbe::<u32>::new();
  let id = outputs.register_subscriber(Arc::new(probe)).expect("register");
  outputs.unregister_subscription(id);
  assert!(state.is_ready(&inputs, &outputs));
  assert!(!state.is_completed(&inputs, &outputs));
}

#[test]
fn conjunction_completes_when_either_side_does() {
  let (mut inputs, mut outputs) = buffers();
  let state = TransferState::needs_input_and_demand();
  inputs.enqueue(1).expect("enqueue");
  assert!(!state.is_ready(&inputs, &outputs));
  let probe = TestSubscriberProbe::<u32>::new();
  let id = outputs.register_subscriber(Arc::new(probe)).expect("register");
  outputs.more_requested(id, 1);
  assert!(state.is_executable(&inputs, &outputs));
  inputs.complete();
  let _ = inputs.dequeue();
  assert!(state.is_completed(&inputs, &outputs));
}

#[test]
fn disjunction_completes_only_when_both_sides_do() {
  let (mut inputs, mut outputs) = buffers();
  let state = TransferState::NeedsInput.or(TransferState::NeedsDemand);
  inputs.complete();
  assert!(!state.is_completed(&inputs, &outputs));
  let probe = TestSubscriberProbe::<u32>::new();
  let id = outputs.register_subscriber(Arc::new(probe)).expect("register");
  outputs.unregister_subscription(id);
  assert!(state.is_completed(&inputs, &outputs));
}

#[test]
fn stage_supplied_completion_is_terminal() {
  let (inputs, outputs) = buffers();
  let state = TransferState::Completed;
  assert!(!state.is_ready(&inputs, &outputs));
  assert!(state.is_completed(&inputs, &outputs));
}
