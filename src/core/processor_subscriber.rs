use alloc::sync::Arc;

use crate::core::{
  signal::Signal, signal_dispatcher::SignalDispatcher, stream_error::StreamError, subscriber::Subscriber,
  upstream_handle::UpstreamHandle,
};

/// Subscriber face of a processor.
///
/// Hand this to an upstream publisher to feed the processor: every callback
/// is forwarded as a signal into the mailbox, so upstream is never called
/// back synchronously from within a signal handler. Chaining two processors
/// is subscribing the downstream one's facade to the upstream one's exposed
/// publisher.
pub struct ProcessorSubscriber<In, Out> {
  dispatcher: Arc<dyn SignalDispatcher<In, Out>>,
}

impl<In, Out> ProcessorSubscriber<In, Out> {
  /// Creates the facade over the processor's dispatcher.
  #[must_use]
  pub fn new(dispatcher: Arc<dyn SignalDispatcher<In, Out>>) -> Self {
    Self { dispatcher }
  }
}

impl<In, Out> Clone for ProcessorSubscriber<In, Out> {
  fn clone(&self) -> Self {
    Self { dispatcher: self.dispatcher.clone() }
  }
}

impl<In: Send, Out: Send> Subscriber<In> for ProcessorSubscriber<In, Out> {
  fn on_subscribe(&self, subscription: Arc<dyn UpstreamHandle>) {
    self.dispatcher.dispatch(Signal::OnSubscribe(subscription));
  }

  fn on_next(&self, element: In) {
    self.dispatcher.dispatch(Signal::OnNext(element));
  }

  fn on_complete(&self) {
    self.dispatcher.dispatch(Signal::OnComplete);
  }

  fn on_error(&self, cause: StreamError) {
    self.dispatcher.dispatch(Signal::OnError(cause));
  }
}
