use crate::core::{stream_error::StreamError, transfer_context::TransferContext, transfer_state::TransferState};

/// Capability a processor variant supplies to the shared core.
///
/// The lifecycle, the buffers, and the protocol handling are common to every
/// variant; a stage only decides what it waits for and how elements move.
pub trait ProcessorStage<In, Out> {
  /// Returns the state the pump starts from once upstream attached.
  fn initial_transfer_state(&self) -> TransferState {
    TransferState::needs_input_and_demand()
  }

  /// Moves elements between the buffers and returns the next state.
  ///
  /// # Errors
  ///
  /// A returned error fails the processor: every live subscriber receives it
  /// as `on_error` and upstream is cancelled.
  fn transfer(&mut self, ctx: &mut TransferContext<'_, In, Out>) -> Result<TransferState, StreamError>;

  /// Invoked when the publisher handle was exposed, before any other signal.
  ///
  /// Constructors must not emit signals because replies could race the
  /// initial `ExposedPublisher`; fan-in variants subscribe to their secondary
  /// upstreams from this hook instead.
  fn publisher_exposed(&mut self) {}
}
