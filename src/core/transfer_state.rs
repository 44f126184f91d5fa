#[cfg(test)]
mod tests;

use alloc::boxed::Box;

use crate::core::{input_buffer::InputBuffer, output_fan_out::OutputFanOut};

/// Describes what a transfer function is waiting for.
///
/// A state is evaluated against the live buffers: it is *ready* when the
/// awaited condition holds and *completed* when it can never hold again. The
/// pump runs the transfer function while the state is executable, i.e. ready
/// and not completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferState {
  /// Placeholder before the stage supplied its initial state. Never ready,
  /// never completed.
  NotInitialized,
  /// Waiting for a buffered input element.
  NeedsInput,
  /// Waiting for downstream demand at the fan-out tail.
  NeedsDemand,
  /// Waiting for downstream demand or for downstream to close.
  NeedsDemandOrCancel,
  /// The stage terminated itself.
  Completed,
  /// Conjunction: ready iff both are ready, completed iff either is.
  Both(Box<TransferState>, Box<TransferState>),
  /// Disjunction: ready iff either is ready, completed iff both are.
  Either(Box<TransferState>, Box<TransferState>),
}

impl TransferState {
  /// Returns the standard state of a one-to-one stage: an input element and
  /// demand for the produced element.
  #[must_use]
  pub fn needs_input_and_demand() -> Self {
    Self::NeedsInput.and(Self::NeedsDemand)
  }

  /// Combines two states conjunctively.
  #[must_use]
  pub fn and(self, other: Self) -> Self {
    Self::Both(Box::new(self), Box::new(other))
  }

  /// Combines two states disjunctively.
  #[must_use]
  pub fn or(self, other: Self) -> Self {
    Self::Either(Box::new(self), Box::new(other))
  }

  /// Returns `true` when the awaited condition currently holds.
  #[must_use]
  pub fn is_ready<In, Out>(&self, inputs: &InputBuffer<In>, outputs: &OutputFanOut<Out>) -> bool {
    match self {
      | Self::NotInitialized | Self::Completed => false,
      | Self::NeedsInput => inputs.has_input(),
      | Self::NeedsDemand => outputs.demand_available(),
      | Self::NeedsDemandOrCancel => outputs.demand_available() || outputs.is_closed(),
      | Self::Both(a, b) => a.is_ready(inputs, outputs) && b.is_ready(inputs, outputs),
      | Self::Either(a, b) => a.is_ready(inputs, outputs) || b.is_ready(inputs, outputs),
    }
  }

  /// Returns `true` when the awaited condition can never hold again.
  #[must_use]
  pub fn is_completed<In, Out>(&self, inputs: &InputBuffer<In>, outputs: &OutputFanOut<Out>) -> bool {
    match self {
      | Self::NotInitialized | Self::NeedsDemandOrCancel => false,
      | Self::Completed => true,
      | Self::NeedsInput => inputs.is_depleted(),
      | Self::NeedsDemand => outputs.is_closed(),
      | Self::Both(a, b) => a.is_completed(inputs, outputs) || b.is_completed(inputs, outputs),
      | Self::Either(a, b) => a.is_completed(inputs, outputs) && b.is_completed(inputs, outputs),
    }
  }

  /// Returns `true` while the transfer function may run now.
  #[must_use]
  pub fn is_executable<In, Out>(&self, inputs: &InputBuffer<In>, outputs: &OutputFanOut<Out>) -> bool {
    self.is_ready(inputs, outputs) && !self.is_completed(inputs, outputs)
  }
}
