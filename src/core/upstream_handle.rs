/// Capability handed out by an upstream producer.
///
/// Implementations must be thread-safe; the reactive-streams contract allows
/// `request` and `cancel` to be invoked from the consuming stage's own
/// execution context at any time after `on_subscribe`.
pub trait UpstreamHandle: Send + Sync {
  /// Requests `n` further elements from the producer. `n` is always positive.
  fn request(&self, n: u64);

  /// Cancels the subscription. Idempotent; no elements may be demanded
  /// afterwards.
  fn cancel(&self);
}
