use crate::core::{
  processor_stage::ProcessorStage, stream_error::StreamError, transfer_context::TransferContext,
  transfer_state::TransferState,
};

/// One-to-one user transform: applies a closure to each element.
///
/// The identity transform (`TransformStage::new(Ok)`) is the reference stage
/// for protocol tests: what goes in comes out, demand-bounded and in order.
pub struct TransformStage<F> {
  op: F,
}

impl<F> TransformStage<F> {
  /// Creates a stage from the per-element operation.
  #[must_use]
  pub const fn new(op: F) -> Self {
    Self { op }
  }
}

impl<In, Out, F> ProcessorStage<In, Out> for TransformStage<F>
where
  Out: Clone,
  F: FnMut(In) -> Result<Out, StreamError>,
{
  fn transfer(&mut self, ctx: &mut TransferContext<'_, In, Out>) -> Result<TransferState, StreamError> {
    let element = ctx.dequeue_input()?;
    let produced = (self.op)(element)?;
    ctx.enqueue_output(produced)?;
    Ok(TransferState::needs_input_and_demand())
  }
}
