/// Shutdown progress of the fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FanOutPhase {
  /// Accepting subscribers and elements.
  Open,
  /// Producer finished; draining buffered elements to live subscribers.
  Completing,
  /// All live subscribers received their terminal signal or cancelled.
  Closed {
    /// `false` only when the fan-out was aborted with an error.
    completed: bool,
  },
}
