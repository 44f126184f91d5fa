#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};

use tokio::sync::{mpsc, watch};

use super::tokio_signal_dispatcher::TokioSignalDispatcher;
use crate::core::{
  ExposedPublisher, ProcessorActor, ProcessorSettings, ProcessorStage, ProcessorSubscriber, Signal,
  SignalDispatcher, StreamError,
};

/// A processor running as one Tokio task.
///
/// The task consumes the signal channel serially and ends once the actor shut
/// down. [`TokioProcessor::shutdown`] and dropping the runner terminate the
/// stage abruptly: live subscribers are failed and upstream is cancelled.
pub struct TokioProcessor<In, Out> {
  publisher:  ExposedPublisher<In, Out>,
  subscriber: ProcessorSubscriber<In, Out>,
  stop:       watch::Sender<bool>,
  task:       tokio::task::JoinHandle<()>,
}

impl<In: Send + 'static, Out: Send + Clone + 'static> TokioProcessor<In, Out> {
  /// Spawns a processor onto the current Tokio runtime and queues its
  /// `ExposedPublisher` signal.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::ExecutorUnavailable`] outside a Tokio runtime, or
  /// [`StreamError::InvalidSetting`] when the settings do not validate.
  pub fn spawn(
    settings: ProcessorSettings,
    stage: Box<dyn ProcessorStage<In, Out> + Send>,
  ) -> Result<Self, StreamError> {
    tokio::runtime::Handle::try_current().map_err(|_| StreamError::ExecutorUnavailable)?;
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let (stop, mut stopped) = watch::channel(false);
    let dispatcher: Arc<dyn SignalDispatcher<In, Out>> = Arc::new(TokioSignalDispatcher::new(sender));
    let mut actor = ProcessorActor::new(settings, stage, dispatcher.clone())?;
    let publisher = ExposedPublisher::new(dispatcher.clone());
    dispatcher.dispatch(Signal::ExposedPublisher(publisher.clone()));

    let task = tokio::spawn(async move {
      loop {
        tokio::select! {
          signal = receiver.recv() => {
            let Some(signal) = signal else { break };
            tracing::trace!(signal = signal.name(), "processing signal");
            actor.receive(signal);
            if actor.state().is_terminal() {
              break;
            }
          },
          _ = stopped.changed() => break,
        }
      }
      if !actor.state().is_terminal() {
        tracing::warn!("runner stopped before shutdown; terminating abruptly");
        actor.abrupt_terminate();
      }
    });

    Ok(Self { publisher, subscriber: ProcessorSubscriber::new(dispatcher), stop, task })
  }

  /// Returns the publisher handle downstream subscribers attach through.
  #[must_use]
  pub fn publisher(&self) -> ExposedPublisher<In, Out> {
    self.publisher.clone()
  }

  /// Returns the subscriber facade an upstream publisher feeds.
  #[must_use]
  pub fn subscriber(&self) -> ProcessorSubscriber<In, Out> {
    self.subscriber.clone()
  }

  /// Stops the task without a graceful drain. Live subscribers observe
  /// [`StreamError::AbruptTermination`].
  pub fn shutdown(&self) {
    let _ = self.stop.send(true);
  }

  /// Waits for the processor task to finish. The stream keeps running while
  /// this waits; it ends through protocol shutdown.
  pub async fn join(self) {
    let Self { publisher: _publisher, subscriber: _subscriber, stop: _stop, task } = self;
    let _ = task.await;
  }
}
