/// Lifecycle state of a processor actor.
///
/// States are strictly ordered and non-overlapping; any state may transition
/// directly to [`ProcessorState::ShutDown`] on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
  /// Waiting for the materializer to expose the publisher handle.
  WaitingExposedPublisher,
  /// Waiting for the upstream subscription.
  WaitingForUpstream,
  /// Transferring elements.
  Running,
  /// Upstream is done; draining buffered elements downstream.
  Flushing,
  /// Terminal state.
  ShutDown,
}

impl ProcessorState {
  /// Returns `true` once no further signals are processed.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::ShutDown)
  }
}
