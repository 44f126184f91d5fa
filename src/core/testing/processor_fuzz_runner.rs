
use alloc::{vec, vec::Vec};

use super::{test_subscriber_probe::TestSubscriberProbe, test_upstream_probe::TestUpstreamProbe};
use crate::core::{processor_cell::ProcessorCell, subscriber::Subscriber};

/// Deterministic fuzz driver for processor protocol tests.
///
/// Interleaves upstream pushes, downstream requests, and mailbox drains from
/// a seeded linear congruential generator. Pushes stay within the demand the
/// processor granted upstream, so every run is a legal reactive-streams
/// interaction; elements are the sequence `0, 1, 2, ..`.
pub struct ProcessorFuzzRunner {
  state:     u64,
  pushed:    u64,
  requested: Vec<u64>,
}

impl ProcessorFuzzRunner {
  /// Creates a runner with a deterministic seed.
  #[must_use]
  pub const fn new(seed: u64) -> Self {
    Self { state: seed, pushed: 0, requested: Vec::new() }
  }

  const fn next_u32(&mut self) -> u32 {
    self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
    (self.state >> 32) as u32
  }

  /// Runs `steps` randomized actions against an identity processor.
  ///
  /// `subscribers` must already hold their subscriptions.
  pub fn run(
    &mut self,
    cell: &mut ProcessorCell<u64, u64>,
    upstream: &TestUpstreamProbe,
    subscribers: &[TestSubscriberProbe<u64>],
    steps: usize,
  ) {
    self.requested = vec![0; subscribers.len()];
    for _ in 0..steps {
      match self.next_u32() % 4 {
        | 0 => {
          if self.pushed < upstream.total_requested() {
            cell.subscriber().on_next(self.pushed);
            self.pushed += 1;
          }
        },
        | 1 | 2 => {
          let index = (self.next_u32() as usize) % subscribers.len();
          let amount = u64::from(self.next_u32() % 3) + 1;
          subscribers[index].request(amount);
          self.requested[index] += amount;
        },
        | _ => {
          let _ = cell.run_until_idle();
        },
      }
    }
    let _ = cell.run_until_idle();
  }

  /// Returns how many elements were pushed upstream-to-downstream.
  #[must_use]
  pub const fn pushed(&self) -> u64 {
    self.pushed
  }

  /// Returns the cumulative demand one subscriber requested.
  ///
  /// # Panics
  ///
  /// Panics when `index` is outside the subscriber slice of the last run.
  #[must_use]
  pub fn requested(&self, index: usize) -> u64 {
    self.requested[index]
  }
}
