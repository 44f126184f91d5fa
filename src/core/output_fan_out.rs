
use alloc::{
  collections::{BTreeMap, VecDeque},
  sync::Arc,
  vec::Vec,
};

use crate::core::{
  fan_out_cursor::FanOutCursor, fan_out_phase::FanOutPhase, stream_error::StreamError, subscriber::Subscriber,
  subscription_id::SubscriptionId,
};

/// Shared output buffer serving every downstream subscriber.
///
/// Elements are addressed by absolute sequence number. Each subscriber owns a
/// cursor into the buffer and an independent demand account; an element is
/// released once every live cursor has passed it. There is no per-subscriber
/// queue: one slow subscriber stalls the stage when the buffer reaches its
/// hard cap.
pub struct OutputFanOut<Out> {
  buffer:        VecDeque<Out>,
  base_sequence: u64,
  max_capacity:  usize,
  subscriptions: BTreeMap<SubscriptionId, FanOutCursor<Out>>,
  next_id:       u64,
  phase:         FanOutPhase,
  failure:       Option<StreamError>,
}

impl<Out> OutputFanOut<Out> {
  /// Creates an empty fan-out with no subscribers.
  #[must_use]
  pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(initial_capacity),
      base_sequence: 0,
      max_capacity,
      subscriptions: BTreeMap::new(),
      next_id: 0,
      phase: FanOutPhase::Open,
      failure: None,
    }
  }

  /// Returns the sequence number one past the newest buffered element.
  #[must_use]
  pub fn tail_sequence(&self) -> u64 {
    self.base_sequence + self.buffer.len() as u64
  }

  /// Returns `true` while an element could be delivered immediately: some
  /// live subscriber has demand at the tail and the buffer is below its hard
  /// cap.
  #[must_use]
  pub fn demand_available(&self) -> bool {
    let tail = self.tail_sequence();
    self.buffer.len() < self.max_capacity
      && self.subscriptions.values().any(|cursor| cursor.demand.is_available() && cursor.cursor == tail)
  }

  /// Returns `true` once downstream is closed: every subscriber that ever
  /// registered has received its terminal signal or cancelled.
  #[must_use]
  pub const fn is_closed(&self) -> bool {
    matches!(self.phase, FanOutPhase::Closed { .. })
  }

  /// Returns `Some(completed)` once closed, where `completed` is `false` only
  /// after an abort.
  #[must_use]
  pub const fn shutdown_outcome(&self) -> Option<bool> {
    match self.phase {
      | FanOutPhase::Closed { completed } => Some(completed),
      | FanOutPhase::Open | FanOutPhase::Completing => None,
    }
  }

  /// Returns the number of live subscriptions.
  #[must_use]
  pub fn subscriber_count(&self) -> usize {
    self.subscriptions.len()
  }

  /// Returns the number of buffered elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  /// Returns `true` when no element is buffered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Registers a subscriber with a fresh cursor at the current tail.
  ///
  /// Returns the assigned id, or `None` when no subscription was created:
  /// after shutdown has begun the terminal signal is sent instead, and a
  /// duplicate subscriber handle is failed with a protocol error.
  pub fn register_subscriber(&mut self, subscriber: Arc<dyn Subscriber<Out>>) -> Option<SubscriptionId> {
    match self.phase {
      | FanOutPhase::Completing | FanOutPhase::Closed { completed: true } => {
        subscriber.on_complete();
        return None;
      },
      | FanOutPhase::Closed { completed: false } => {
        subscriber.on_error(self.terminal_failure());
        return None;
      },
      | FanOutPhase::Open => {},
    }
    if self.subscriptions.values().any(|cursor| Arc::ptr_eq(&cursor.subscriber, &subscriber)) {
      subscriber.on_error(StreamError::ProtocolViolation { context: "subscriber already registered" });
      return None;
    }
    let id = SubscriptionId::new(self.next_id);
    self.next_id += 1;
    self.subscriptions.insert(id, FanOutCursor::new(subscriber, self.tail_sequence()));
    Some(id)
  }

  /// Removes a subscription. Idempotent; removing the last live subscription
  /// closes downstream.
  pub fn unregister_subscription(&mut self, id: SubscriptionId) {
    if self.subscriptions.remove(&id).is_some() {
      if self.subscriptions.is_empty() && !self.is_closed() {
        self.phase = FanOutPhase::Closed { completed: true };
      }
      self.release_consumed();
    }
  }

  /// Marks the element stream as complete and begins the graceful drain:
  /// every subscriber receives `on_complete` once its cursor reaches the
  /// tail. Idempotent; no further enqueues are permitted.
  pub fn complete(&mut self) {
    if self.phase == FanOutPhase::Open {
      self.phase = FanOutPhase::Completing;
      let tail = self.tail_sequence();
      let drained: Vec<SubscriptionId> =
        self.subscriptions.iter().filter(|(_, cursor)| cursor.cursor == tail).map(|(id, _)| *id).collect();
      for id in drained {
        if let Some(cursor) = self.subscriptions.remove(&id) {
          cursor.subscriber.on_complete();
        }
      }
      self.close_if_drained();
    }
  }

  /// Fails every live subscriber immediately and drops buffered elements.
  pub fn abort(&mut self, cause: StreamError) {
    if self.is_closed() {
      return;
    }
    self.failure = Some(cause.clone());
    self.phase = FanOutPhase::Closed { completed: false };
    for cursor in self.subscriptions.values() {
      cursor.subscriber.on_error(cause.clone());
    }
    self.subscriptions.clear();
    self.base_sequence = self.tail_sequence();
    self.buffer.clear();
  }
}

impl<Out: Clone> OutputFanOut<Out> {
  /// Adds demand for one subscriber and delivers any buffered elements it is
  /// eligible for. A request of zero fails only that subscriber.
  pub fn more_requested(&mut self, id: SubscriptionId, n: u64) {
    if n == 0 {
      if let Some(cursor) = self.subscriptions.remove(&id) {
        cursor.subscriber.on_error(StreamError::InvalidDemand { requested: 0 });
        self.close_if_drained();
      }
      return;
    }
    if let Some(cursor) = self.subscriptions.get_mut(&id) {
      cursor.demand = cursor.demand.add(n);
      self.dispatch_to(id);
    }
  }

  /// Appends an element at the tail and pushes it to every subscriber whose
  /// cursor is there with demand available.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::ProtocolViolation`] when called after completion
  /// or without any eligible subscriber; the pump only runs the transfer
  /// function while [`OutputFanOut::demand_available`] holds.
  pub fn enqueue(&mut self, element: Out) -> Result<(), StreamError> {
    if self.phase != FanOutPhase::Open {
      return Err(StreamError::ProtocolViolation { context: "element enqueued after completion" });
    }
    if !self.demand_available() {
      return Err(StreamError::ProtocolViolation { context: "element enqueued without demand" });
    }
    let enqueued_at = self.tail_sequence();
    self.buffer.push_back(element);
    for cursor in self.subscriptions.values_mut() {
      if cursor.cursor == enqueued_at && cursor.demand.consume_one() {
        let index = (cursor.cursor - self.base_sequence) as usize;
        cursor.subscriber.on_next(self.buffer[index].clone());
        cursor.cursor += 1;
      }
    }
    self.release_consumed();
    Ok(())
  }

  fn dispatch_to(&mut self, id: SubscriptionId) {
    let tail = self.tail_sequence();
    let mut drained = false;
    if let Some(cursor) = self.subscriptions.get_mut(&id) {
      while cursor.cursor < tail && cursor.demand.is_available() {
        let index = (cursor.cursor - self.base_sequence) as usize;
        let element = self.buffer[index].clone();
        let _ = cursor.demand.consume_one();
        cursor.subscriber.on_next(element);
        cursor.cursor += 1;
      }
      drained = self.phase == FanOutPhase::Completing && cursor.cursor == tail;
    }
    if drained {
      if let Some(cursor) = self.subscriptions.remove(&id) {
        cursor.subscriber.on_complete();
      }
      self.close_if_drained();
    }
    self.release_consumed();
  }
}

impl<Out> OutputFanOut<Out> {
  fn close_if_drained(&mut self) {
    if self.subscriptions.is_empty() && !self.is_closed() {
      self.phase = FanOutPhase::Closed { completed: true };
    }
  }

  fn release_consumed(&mut self) {
    match self.subscriptions.values().map(|cursor| cursor.cursor).min() {
      | Some(min_cursor) => {
        while self.base_sequence < min_cursor {
          self.buffer.pop_front();
          self.base_sequence += 1;
        }
      },
      | None => {
        self.base_sequence = self.tail_sequence();
        self.buffer.clear();
      },
    }
  }

  fn terminal_failure(&self) -> StreamError {
    match &self.failure {
      | Some(cause) => cause.clone(),
      | None => StreamError::AbruptTermination,
    }
  }
}
