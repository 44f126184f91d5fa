use crate::core::{input_buffer::InputBuffer, output_fan_out::OutputFanOut, stream_error::StreamError};

/// Buffer access window handed to a transfer function.
///
/// A transfer function reads input, writes output, and returns the next
/// [`TransferState`](crate::core::TransferState); it never touches the
/// lifecycle or the subscriber set.
pub struct TransferContext<'a, In, Out> {
  inputs:  &'a mut InputBuffer<In>,
  outputs: &'a mut OutputFanOut<Out>,
}

impl<'a, In, Out> TransferContext<'a, In, Out> {
  pub(crate) fn new(inputs: &'a mut InputBuffer<In>, outputs: &'a mut OutputFanOut<Out>) -> Self {
    Self { inputs, outputs }
  }

  /// Removes the head input element.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::TransferFailed`] when no element is buffered; a
  /// stage only runs while its declared state is ready, so dequeueing from an
  /// empty buffer means the stage declared the wrong state.
  pub fn dequeue_input(&mut self) -> Result<In, StreamError> {
    self.inputs.dequeue().ok_or(StreamError::TransferFailed { context: "dequeue from empty input buffer" })
  }

  /// Returns `true` while an input element is buffered.
  #[must_use]
  pub fn has_input(&self) -> bool {
    self.inputs.has_input()
  }

  /// Returns `true` once upstream finished and the input buffer drained.
  #[must_use]
  pub fn inputs_depleted(&self) -> bool {
    self.inputs.is_depleted()
  }

  /// Returns `true` while the fan-out can accept an element immediately.
  #[must_use]
  pub fn demand_available(&self) -> bool {
    self.outputs.demand_available()
  }

  /// Returns `true` once every downstream subscriber is gone.
  #[must_use]
  pub fn downstream_closed(&self) -> bool {
    self.outputs.is_closed()
  }
}

impl<In, Out: Clone> TransferContext<'_, In, Out> {
  /// Appends an element to the fan-out, delivering it to every eligible
  /// subscriber.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::ProtocolViolation`] when no subscriber has demand
  /// at the tail.
  pub fn enqueue_output(&mut self, element: Out) -> Result<(), StreamError> {
    self.outputs.enqueue(element)
  }
}
