use alloc::sync::Arc;

use crate::core::{demand::Demand, subscriber::Subscriber};

/// One downstream subscriber's position in the shared fan-out buffer.
///
/// `cursor` is an absolute sequence number; the subscriber has consumed every
/// element below it. Outside of fan-out mutation, `demand` is only available
/// while the cursor sits at the buffer tail.
pub(crate) struct FanOutCursor<Out> {
  pub(crate) subscriber: Arc<dyn Subscriber<Out>>,
  pub(crate) cursor:     u64,
  pub(crate) demand:     Demand,
}

impl<Out> FanOutCursor<Out> {
  pub(crate) fn new(subscriber: Arc<dyn Subscriber<Out>>, cursor: u64) -> Self {
    Self { subscriber, cursor, demand: Demand::none() }
  }
}
