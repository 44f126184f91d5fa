use core::fmt;

#[cfg(test)]
mod tests;

/// Errors raised by processor operations.
///
/// The same type doubles as the terminal cause carried by
/// [`Subscriber::on_error`](crate::core::Subscriber::on_error), so an upstream
/// failure propagates to every live downstream subscriber verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
  /// Indicates a reactive-streams protocol violation.
  ProtocolViolation {
    /// Description of the violated rule.
    context: &'static str,
  },
  /// Indicates a non-positive demand request from a subscriber.
  InvalidDemand {
    /// Requested demand amount.
    requested: u64,
  },
  /// Indicates an input buffer that received more elements than requested.
  BufferOverflow,
  /// Indicates an out-of-range buffer size in the processor settings.
  InvalidSetting {
    /// Name of the offending setting.
    name:  &'static str,
    /// Rejected value.
    value: usize,
  },
  /// Indicates that a transfer function failed.
  TransferFailed {
    /// Description of the failure.
    context: &'static str,
  },
  /// Indicates the processor stopped without a graceful shutdown.
  AbruptTermination,
  /// Indicates no async executor is available to drive the processor.
  ExecutorUnavailable,
}

impl fmt::Display for StreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::ProtocolViolation { context } => write!(f, "protocol violation: {context}"),
      | Self::InvalidDemand { requested } => write!(f, "invalid demand: {requested}"),
      | Self::BufferOverflow => write!(f, "input buffer overflow"),
      | Self::InvalidSetting { name, value } => write!(f, "invalid setting: {name}={value}"),
      | Self::TransferFailed { context } => write!(f, "transfer failed: {context}"),
      | Self::AbruptTermination => write!(f, "processor terminated abruptly"),
      | Self::ExecutorUnavailable => write!(f, "async executor unavailable"),
    }
  }
}
