use alloc::sync::Arc;

use crate::core::{
  signal::Signal, signal_dispatcher::SignalDispatcher, subscription_id::SubscriptionId,
  upstream_handle::UpstreamHandle,
};

/// Subscription handle given to a downstream subscriber.
///
/// Requests and cancellations are forwarded as signals into the owning
/// processor's mailbox; nothing runs on the caller's thread. A request of
/// zero is forwarded as-is so the processor can fail the subscriber with a
/// protocol error.
pub struct StreamSubscription<In, Out> {
  id:         SubscriptionId,
  dispatcher: Arc<dyn SignalDispatcher<In, Out>>,
}

impl<In, Out> StreamSubscription<In, Out> {
  /// Creates a handle for the given subscription.
  #[must_use]
  pub fn new(id: SubscriptionId, dispatcher: Arc<dyn SignalDispatcher<In, Out>>) -> Self {
    Self { id, dispatcher }
  }

  /// Returns the subscription identifier.
  #[must_use]
  pub const fn id(&self) -> SubscriptionId {
    self.id
  }
}

impl<In, Out> UpstreamHandle for StreamSubscription<In, Out> {
  fn request(&self, n: u64) {
    self.dispatcher.dispatch(Signal::RequestMore(self.id, n));
  }

  fn cancel(&self) {
    self.dispatcher.dispatch(Signal::Cancel(self.id));
  }
}
