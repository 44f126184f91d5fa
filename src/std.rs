//! Tokio integration layer.
//!
//! Binds a processor actor to a Tokio task consuming its signal channel, so
//! each processor is one task and every signal is processed serially.

/// Tokio-backed processor runner.
mod tokio_processor;
/// Channel-backed signal dispatcher.
mod tokio_signal_dispatcher;

pub use tokio_processor::TokioProcessor;
pub use tokio_signal_dispatcher::TokioSignalDispatcher;
