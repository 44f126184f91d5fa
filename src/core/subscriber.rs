use alloc::sync::Arc;

use crate::core::{stream_error::StreamError, upstream_handle::UpstreamHandle};

/// Capability of one downstream subscriber.
///
/// A subscriber observes `on_subscribe` once, then zero or more `on_next`
/// calls bounded by its requested demand, then at most one terminal signal.
/// Implementations must be thread-safe by the reactive-streams contract.
pub trait Subscriber<T>: Send + Sync {
  /// Delivers the subscription handle the subscriber uses to request demand
  /// and to cancel.
  fn on_subscribe(&self, subscription: Arc<dyn UpstreamHandle>);

  /// Delivers the next element.
  fn on_next(&self, element: T);

  /// Signals successful completion. No further signals follow.
  fn on_complete(&self);

  /// Signals failure. No further signals follow.
  fn on_error(&self, cause: StreamError);
}
