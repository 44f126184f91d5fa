use crate::core::signal::Signal;

/// Seam between a processor and the transport that carries its signals.
///
/// Subscription handles and the exposed publisher hold a dispatcher so that
/// outside parties never call into the processor directly; they enqueue a
/// [`Signal`] and the processor observes it on its own execution context.
pub trait SignalDispatcher<In, Out>: Send + Sync {
  /// Enqueues a signal for the owning processor. Signals dispatched after
  /// shutdown are dropped.
  fn dispatch(&self, signal: Signal<In, Out>);
}
