use alloc::{collections::VecDeque, sync::Arc};

use spin::Mutex;

use crate::core::{signal::Signal, signal_dispatcher::SignalDispatcher};

/// Unbounded spin-lock signal queue.
///
/// The mailbox only stores; it never invokes the processor. A single consumer
/// (the [`ProcessorCell`](crate::core::ProcessorCell) or a runtime task)
/// drains it and feeds the actor serially.
pub struct SignalMailbox<In, Out> {
  queue: Arc<Mutex<VecDeque<Signal<In, Out>>>>,
}

impl<In, Out> SignalMailbox<In, Out> {
  /// Creates an empty mailbox.
  #[must_use]
  pub fn new() -> Self {
    Self { queue: Arc::new(Mutex::new(VecDeque::new())) }
  }

  /// Removes the oldest queued signal.
  #[must_use]
  pub fn take_next(&self) -> Option<Signal<In, Out>> {
    self.queue.lock().pop_front()
  }

  /// Returns the number of queued signals.
  #[must_use]
  pub fn len(&self) -> usize {
    self.queue.lock().len()
  }

  /// Returns `true` when no signal is queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.queue.lock().is_empty()
  }
}

impl<In, Out> Default for SignalMailbox<In, Out> {
  fn default() -> Self {
    Self::new()
  }
}

impl<In, Out> Clone for SignalMailbox<In, Out> {
  fn clone(&self) -> Self {
    Self { queue: self.queue.clone() }
  }
}

impl<In: Send, Out: Send> SignalDispatcher<In, Out> for SignalMailbox<In, Out> {
  fn dispatch(&self, signal: Signal<In, Out>) {
    self.queue.lock().push_back(signal);
  }
}
