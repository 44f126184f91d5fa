use alloc::{sync::Arc, vec::Vec};

use spin::Mutex;

use crate::core::upstream_handle::UpstreamHandle;

/// Upstream handle that records every request batch and cancellation.
pub struct TestUpstreamProbe {
  state: Arc<Mutex<UpstreamProbeState>>,
}

struct UpstreamProbeState {
  requests:  Vec<u64>,
  cancelled: bool,
}

impl TestUpstreamProbe {
  /// Creates a probe with no recorded interactions.
  #[must_use]
  pub fn new() -> Self {
    Self { state: Arc::new(Mutex::new(UpstreamProbeState { requests: Vec::new(), cancelled: false })) }
  }

  /// Returns every `request(n)` batch in emission order.
  #[must_use]
  pub fn requests(&self) -> Vec<u64> {
    self.state.lock().requests.clone()
  }

  /// Returns the cumulative requested element count.
  #[must_use]
  pub fn total_requested(&self) -> u64 {
    self.state.lock().requests.iter().sum()
  }

  /// Returns `true` once `cancel` was observed.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.state.lock().cancelled
  }
}

impl Default for TestUpstreamProbe {
  fn default() -> Self {
    Self::new()
  }
}

impl Clone for TestUpstreamProbe {
  fn clone(&self) -> Self {
    Self { state: self.state.clone() }
  }
}

impl UpstreamHandle for TestUpstreamProbe {
  fn request(&self, n: u64) {
    self.state.lock().requests.push(n);
  }

  fn cancel(&self) {
    self.state.lock().cancelled = true;
  }
}
