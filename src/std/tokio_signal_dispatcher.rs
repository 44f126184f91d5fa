use tokio::sync::mpsc;

use crate::core::{Signal, SignalDispatcher};

/// Dispatcher backed by an unbounded Tokio channel.
///
/// Sending never blocks; backpressure is carried by the reactive-streams
/// demand protocol, not by the mailbox. Signals dispatched after the consumer
/// task ended are dropped.
pub struct TokioSignalDispatcher<In, Out> {
  sender: mpsc::UnboundedSender<Signal<In, Out>>,
}

impl<In, Out> TokioSignalDispatcher<In, Out> {
  /// Creates a dispatcher over the channel sender.
  #[must_use]
  pub const fn new(sender: mpsc::UnboundedSender<Signal<In, Out>>) -> Self {
    Self { sender }
  }
}

impl<In, Out> Clone for TokioSignalDispatcher<In, Out> {
  fn clone(&self) -> Self {
    Self { sender: self.sender.clone() }
  }
}

impl<In: Send, Out: Send> SignalDispatcher<In, Out> for TokioSignalDispatcher<In, Out> {
  fn dispatch(&self, signal: Signal<In, Out>) {
    let _ = self.sender.send(signal);
  }
}
