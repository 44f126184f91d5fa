use alloc::{sync::Arc, vec};

use super::Pump;
use crate::core::{
  input_buffer::InputBuffer,
  output_fan_out::OutputFanOut,
  processor_stage::ProcessorStage,
  pump_outcome::PumpOutcome,
  stream_error::StreamError,
  testing::{TestSubscriberProbe, TestUpstreamProbe},
  transfer_context::TransferContext,
  transfer_state::TransferState,
  transform_stage::TransformStage,
};

fn ready_buffers(elements: &[u32], demand: u64) -> (InputBuffer<u32>, OutputFanOut<u32>, TestSubscriberProbe<u32>) {
  let mut inputs = InputBuffer::attached(Arc::new(TestUpstreamProbe::new()), 8, 8);
  for element in elements {
    inputs.enqueue(*element).expect("enqueue");
  }
  let mut outputs = OutputFanOut::new(8, 8);
  let probe = TestSubscriberProbe::new();
  let id = outputs.register_subscriber(Arc::new(probe.clone())).expect("register");
  if demand > 0 {
    outputs.more_requested(id, demand);
  }
  (inputs, outputs, probe)
}

#[test]
fn uninitialized_pump_is_suspended() {
  let (mut inputs, mut outputs, _probe) = ready_buffers(&[1], 1);
  let mut stage = TransformStage::new(Ok::<u32, StreamError>);
  let mut pump = Pump::new();
  assert_eq!(pump.pump(&mut stage, &mut inputs, &mut outputs), Ok(PumpOutcome::Suspended));
  assert_eq!(inputs.len(), 1);
}

#[test]
fn pump_transfers_until_demand_runs_out() {
  let (mut inputs, mut outputs, probe) = ready_buffers(&[1, 2, 3], 2);
  let mut stage = TransformStage::new(|element: u32| Ok(element * 10));
  let mut pump = Pump::new();
  pump.init(stage.initial_transfer_state());
  assert_eq!(pump.pump(&mut stage, &mut inputs, &mut outputs), Ok(PumpOutcome::Suspended));
  assert_eq!(probe.received(), vec![10, 20]);
  assert_eq!(inputs.len(), 1);
}

#[test]
fn pump_reports_completion_once_inputs_deplete() {
  let (mut inputs, mut outputs, probe) = ready_buffers(&[1], 5);
  inputs.complete();
  let mut stage = TransformStage::new(Ok::<u32, StreamError>);
  let mut pump = Pump::new();
  pump.init(stage.initial_transfer_state());
  assert_eq!(pump.pump(&mut stage, &mut inputs, &mut outputs), Ok(PumpOutcome::Completed));
  assert_eq!(probe.received(), vec![1]);
}

#[test]
fn transfer_failure_surfaces_the_cause() {
  let (mut inputs, mut outputs, _probe) = ready_buffers(&[1], 1);
  let mut stage =
    TransformStage::new(|_: u32| Err::<u32, _>(StreamError::TransferFailed { context: "boom" }));
  let mut pump = Pump::new();
  pump.init(stage.initial_transfer_state());
  assert_eq!(
    pump.pump(&mut stage, &mut inputs, &mut outputs),
    Err(StreamError::TransferFailed { context: "boom" })
  );
}

#[test]
fn pump_is_not_reentered_from_within_transfer() {
  struct DepthStage {
    depth:     u32,
    max_depth: u32,
  }
  impl ProcessorStage<u32, u32> for DepthStage {
    fn transfer(&mut self, ctx: &mut TransferContext<'_, u32, u32>) -> Result<TransferState, StreamError> {
      self.depth += 1;
      self.max_depth = self.max_depth.max(self.depth);
      let element = ctx.dequeue_input()?;
      ctx.enqueue_output(element)?;
      self.depth -= 1;
      Ok(TransferState::needs_input_and_demand())
    }
  }
  let (mut inputs, mut outputs, _probe) = ready_buffers(&[1, 2, 3], 3);
  let mut stage = DepthStage { depth: 0, max_depth: 0 };
  let mut pump = Pump::new();
  pump.init(TransferState::needs_input_and_demand());
  let _ = pump.pump(&mut stage, &mut inputs, &mut outputs).expect("pump");
  assert_eq!(stage.max_depth, 1);
}
