
use alloc::{sync::Arc, vec::Vec};
use core::mem;

use spin::Mutex;

use crate::core::{
  shutdown_reason::ShutdownReason, signal::Signal, signal_dispatcher::SignalDispatcher, subscriber::Subscriber,
};

/// Publisher handle the materializer hands to the outside world.
///
/// Subscribe calls may arrive from any thread; they are collected into a
/// pending queue and announced to the processor with a single
/// `SubscribePending` signal, so the subscriber set is only ever mutated from
/// the actor's own execution. After shutdown the recorded reason is delivered
/// directly.
pub struct ExposedPublisher<In, Out> {
  state:      Arc<Mutex<PublisherState<Out>>>,
  dispatcher: Arc<dyn SignalDispatcher<In, Out>>,
}

struct PublisherState<Out> {
  pending:  Vec<Arc<dyn Subscriber<Out>>>,
  shutdown: Option<ShutdownReason>,
}

impl<In, Out> ExposedPublisher<In, Out> {
  /// Creates a publisher dispatching into the given mailbox.
  #[must_use]
  pub fn new(dispatcher: Arc<dyn SignalDispatcher<In, Out>>) -> Self {
    Self { state: Arc::new(Mutex::new(PublisherState { pending: Vec::new(), shutdown: None })), dispatcher }
  }

  /// Queues a subscriber and announces it to the processor. After shutdown
  /// the terminal signal is delivered immediately instead.
  pub fn subscribe(&self, subscriber: Arc<dyn Subscriber<Out>>) {
    let shutdown = {
      let mut state = self.state.lock();
      match &state.shutdown {
        | Some(reason) => Some(reason.clone()),
        | None => {
          state.pending.push(subscriber.clone());
          None
        },
      }
    };
    match shutdown {
      | Some(ShutdownReason::Completed) => subscriber.on_complete(),
      | Some(ShutdownReason::Failed(cause)) => subscriber.on_error(cause),
      | None => self.dispatcher.dispatch(Signal::SubscribePending),
    }
  }

  /// Removes and returns all pending subscribers. Called by the processor
  /// when it observes `SubscribePending`.
  #[must_use]
  pub fn take_pending(&self) -> Vec<Arc<dyn Subscriber<Out>>> {
    mem::take(&mut self.state.lock().pending)
  }

  /// Records the terminal reason and delivers it to any still-pending
  /// subscribers. Only the first shutdown takes effect.
  pub fn shutdown(&self, reason: ShutdownReason) {
    let pending = {
      let mut state = self.state.lock();
      if state.shutdown.is_some() {
        return;
      }
      state.shutdown = Some(reason.clone());
      mem::take(&mut state.pending)
    };
    for subscriber in pending {
      match &reason {
        | ShutdownReason::Completed => subscriber.on_complete(),
        | ShutdownReason::Failed(cause) => subscriber.on_error(cause.clone()),
      }
    }
  }

  /// Returns the recorded terminal reason, if shutdown happened.
  #[must_use]
  pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
    self.state.lock().shutdown.clone()
  }
}

impl<In, Out> Clone for ExposedPublisher<In, Out> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), dispatcher: self.dispatcher.clone() }
  }
}
