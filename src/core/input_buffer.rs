
use alloc::{collections::VecDeque, sync::Arc};

use crate::core::{stream_error::StreamError, upstream_handle::UpstreamHandle};

/// Bounded FIFO absorbing upstream `on_next` signals.
///
/// The buffer owns all upstream demand accounting: it prefetches once at
/// construction and afterwards replenishes in batches of half its capacity
/// whenever granted demand plus occupancy has fallen a full batch below the
/// capacity, so in-flight elements never exceed the capacity and demand keeps
/// flowing even when the prefetch was smaller than a batch.
pub struct InputBuffer<In> {
  elements:           VecDeque<In>,
  capacity:           usize,
  batch_size:         usize,
  outstanding:        usize,
  upstream:           Option<Arc<dyn UpstreamHandle>>,
  upstream_completed: bool,
  error:              Option<StreamError>,
}

impl<In> InputBuffer<In> {
  /// Creates a buffer attached to an upstream subscription and issues the
  /// prefetch `request(prefetch)`. This is the sole point where pre-demand is
  /// emitted.
  #[must_use]
  pub fn attached(upstream: Arc<dyn UpstreamHandle>, prefetch: usize, capacity: usize) -> Self {
    let batch_size = (capacity / 2).max(1);
    upstream.request(prefetch as u64);
    Self {
      elements: VecDeque::with_capacity(capacity),
      capacity,
      batch_size,
      outstanding: prefetch,
      upstream: Some(upstream),
      upstream_completed: false,
      error: None,
    }
  }

  /// Creates the sentinel used when upstream finished before ever granting a
  /// subscription. It holds no elements, is never open, and is immediately
  /// depleted.
  #[must_use]
  pub const fn empty() -> Self {
    Self {
      elements:           VecDeque::new(),
      capacity:           0,
      batch_size:         1,
      outstanding:        0,
      upstream:           None,
      upstream_completed: true,
      error:              None,
    }
  }

  /// Appends an element received from upstream.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::ProtocolViolation`] when upstream already
  /// finished, or [`StreamError::BufferOverflow`] when the producer exceeded
  /// its granted demand.
  pub fn enqueue(&mut self, element: In) -> Result<(), StreamError> {
    if self.upstream_completed {
      return Err(StreamError::ProtocolViolation { context: "element received after upstream finished" });
    }
    if self.elements.len() >= self.capacity {
      return Err(StreamError::BufferOverflow);
    }
    self.outstanding = self.outstanding.saturating_sub(1);
    self.elements.push_back(element);
    Ok(())
  }

  /// Removes the head element and emits one upstream `request(batch)` once
  /// granted demand plus occupancy has dropped a full batch below capacity.
  pub fn dequeue(&mut self) -> Option<In> {
    let element = self.elements.pop_front()?;
    if !self.upstream_completed {
      let in_flight = self.outstanding + self.elements.len();
      if self.capacity - in_flight >= self.batch_size {
        if let Some(upstream) = &self.upstream {
          upstream.request(self.batch_size as u64);
        }
        self.outstanding += self.batch_size;
      }
    }
    Some(element)
  }

  /// Marks upstream as finished. Buffered elements keep draining.
  pub const fn complete(&mut self) {
    self.upstream_completed = true;
  }

  /// Records the upstream failure cause and stops all demand accounting.
  pub fn fail(&mut self, cause: StreamError) {
    self.error = Some(cause);
    self.upstream_completed = true;
  }

  /// Cancels upstream at most once and discards buffered elements.
  ///
  /// A buffer whose upstream already finished does not re-cancel it.
  pub fn cancel(&mut self) {
    if !self.upstream_completed {
      if let Some(upstream) = &self.upstream {
        upstream.cancel();
      }
    }
    self.upstream_completed = true;
    self.clear();
  }

  /// Drops buffered contents without signalling upstream.
  pub fn clear(&mut self) {
    self.elements.clear();
  }

  /// Returns `true` while at least one element is buffered.
  #[must_use]
  pub fn has_input(&self) -> bool {
    !self.elements.is_empty()
  }

  /// Returns `true` once the buffer is empty and upstream finished.
  #[must_use]
  pub fn is_depleted(&self) -> bool {
    self.elements.is_empty() && self.upstream_completed
  }

  /// Returns `true` while upstream may still produce.
  #[must_use]
  pub const fn is_open(&self) -> bool {
    !self.upstream_completed
  }

  /// Returns the number of buffered elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  /// Returns `true` when no element is buffered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// Returns the recorded upstream failure, if any.
  #[must_use]
  pub const fn error(&self) -> Option<&StreamError> {
    self.error.as_ref()
  }
}
