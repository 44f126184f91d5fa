#[cfg(test)]
mod tests;

use crate::core::{
  input_buffer::InputBuffer, output_fan_out::OutputFanOut, processor_stage::ProcessorStage,
  pump_outcome::PumpOutcome, stream_error::StreamError, transfer_context::TransferContext,
  transfer_state::TransferState,
};

/// Executor of the transfer function.
///
/// Holds the current [`TransferState`] and re-runs the stage while that state
/// is executable against the buffers. Runs on the actor's own execution only;
/// it is never reentered from within a transfer.
pub struct Pump {
  transfer_state: TransferState,
}

impl Pump {
  /// Creates a pump in the not-initialized state.
  #[must_use]
  pub const fn new() -> Self {
    Self { transfer_state: TransferState::NotInitialized }
  }

  /// Installs the stage's initial transfer state. Called once when upstream
  /// attaches.
  pub fn init(&mut self, initial: TransferState) {
    self.transfer_state = initial;
  }

  /// Returns the current transfer state.
  #[must_use]
  pub const fn transfer_state(&self) -> &TransferState {
    &self.transfer_state
  }

  /// Runs the transfer function to quiescence.
  ///
  /// # Errors
  ///
  /// Propagates the stage's failure cause; the caller fails the processor
  /// with it.
  pub fn pump<In, Out: Clone>(
    &mut self,
    stage: &mut dyn ProcessorStage<In, Out>,
    inputs: &mut InputBuffer<In>,
    outputs: &mut OutputFanOut<Out>,
  ) -> Result<PumpOutcome, StreamError> {
    while self.transfer_state.is_executable(inputs, outputs) {
      let mut ctx = TransferContext::new(inputs, outputs);
      self.transfer_state = stage.transfer(&mut ctx)?;
    }
    if self.transfer_state.is_completed(inputs, outputs) {
      Ok(PumpOutcome::Completed)
    } else {
      Ok(PumpOutcome::Suspended)
    }
  }
}

impl Default for Pump {
  fn default() -> Self {
    Self::new()
  }
}
