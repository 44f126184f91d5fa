use alloc::sync::Arc;

use crate::core::{
  exposed_publisher::ExposedPublisher, stream_error::StreamError, subscription_id::SubscriptionId,
  upstream_handle::UpstreamHandle,
};

/// One reactive-streams protocol message crossing the processor boundary.
///
/// `In` is the element type accepted from upstream, `Out` the element type
/// offered downstream. Signals are delivered serially from a mailbox; the
/// processor never observes two signals concurrently.
pub enum Signal<In, Out> {
  /// Upstream granted a subscription.
  OnSubscribe(Arc<dyn UpstreamHandle>),
  /// Upstream produced an element.
  OnNext(In),
  /// Upstream completed.
  OnComplete,
  /// Upstream failed.
  OnError(StreamError),
  /// The exposed publisher collected new pending subscribers.
  SubscribePending,
  /// A downstream subscriber requested more elements.
  RequestMore(SubscriptionId, u64),
  /// A downstream subscriber cancelled its subscription.
  Cancel(SubscriptionId),
  /// The materializer exposed the downstream publisher handle. Must be the
  /// first signal a processor receives.
  ExposedPublisher(ExposedPublisher<In, Out>),
}

impl<In, Out> Signal<In, Out> {
  /// Returns the signal name for diagnostics.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self {
      | Self::OnSubscribe(_) => "OnSubscribe",
      | Self::OnNext(_) => "OnNext",
      | Self::OnComplete => "OnComplete",
      | Self::OnError(_) => "OnError",
      | Self::SubscribePending => "SubscribePending",
      | Self::RequestMore(_, _) => "RequestMore",
      | Self::Cancel(_) => "Cancel",
      | Self::ExposedPublisher(_) => "ExposedPublisher",
    }
  }
}
