use alloc::{sync::Arc, vec::Vec};

use spin::Mutex;

use crate::core::{stream_error::StreamError, subscriber::Subscriber, upstream_handle::UpstreamHandle};

/// Downstream subscriber that records elements and terminal signals.
///
/// Cloned handles share one recording, so a test can keep a probe while
/// handing a clone to the publisher.
pub struct TestSubscriberProbe<T> {
  state: Arc<Mutex<SubscriberProbeState<T>>>,
}

struct SubscriberProbeState<T> {
  subscription:   Option<Arc<dyn UpstreamHandle>>,
  received:       Vec<T>,
  completed:      bool,
  error:          Option<StreamError>,
  terminal_count: usize,
}

impl<T> TestSubscriberProbe<T> {
  /// Creates a probe with no recorded interactions.
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: Arc::new(Mutex::new(SubscriberProbeState {
        subscription:   None,
        received:       Vec::new(),
        completed:      false,
        error:          None,
        terminal_count: 0,
      })),
    }
  }

  /// Requests more elements through the recorded subscription, if any.
  pub fn request(&self, n: u64) {
    let subscription = self.state.lock().subscription.clone();
    if let Some(subscription) = subscription {
      subscription.request(n);
    }
  }

  /// Cancels the recorded subscription, if any.
  pub fn cancel(&self) {
    let subscription = self.state.lock().subscription.clone();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
  }

  /// Returns `true` once `on_subscribe` was observed.
  #[must_use]
  pub fn has_subscription(&self) -> bool {
    self.state.lock().subscription.is_some()
  }

  /// Returns the number of received elements.
  #[must_use]
  pub fn received_count(&self) -> usize {
    self.state.lock().received.len()
  }

  /// Returns `true` once `on_complete` was observed.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.state.lock().completed
  }

  /// Returns the recorded failure, if any.
  #[must_use]
  pub fn error(&self) -> Option<StreamError> {
    self.state.lock().error.clone()
  }

  /// Returns how many terminal signals were observed. Anything above one is a
  /// protocol breach.
  #[must_use]
  pub fn terminal_count(&self) -> usize {
    self.state.lock().terminal_count
  }
}

impl<T: Clone> TestSubscriberProbe<T> {
  /// Returns every received element in delivery order.
  #[must_use]
  pub fn received(&self) -> Vec<T> {
    self.state.lock().received.clone()
  }
}

impl<T> Default for TestSubscriberProbe<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for TestSubscriberProbe<T> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone() }
  }
}

impl<T: Send> Subscriber<T> for TestSubscriberProbe<T> {
  fn on_subscribe(&self, subscription: Arc<dyn UpstreamHandle>) {
    self.state.lock().subscription = Some(subscription);
  }

  fn on_next(&self, element: T) {
    self.state.lock().received.push(element);
  }

  fn on_complete(&self) {
    let mut state = self.state.lock();
    state.completed = true;
    state.terminal_count += 1;
  }

  fn on_error(&self, cause: StreamError) {
    let mut state = self.state.lock();
    state.error = Some(cause);
    state.terminal_count += 1;
  }
}
