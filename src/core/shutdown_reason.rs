use crate::core::stream_error::StreamError;

/// Terminal outcome recorded by a publisher once its processor shut down.
///
/// Subscribers arriving after shutdown observe this reason instead of a
/// subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
  /// The stream completed; late subscribers receive `on_complete`.
  Completed,
  /// The stream failed; late subscribers receive `on_error` with the cause.
  Failed(StreamError),
}
