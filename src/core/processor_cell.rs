#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};

use crate::core::{
  exposed_publisher::ExposedPublisher, processor_actor::ProcessorActor, processor_settings::ProcessorSettings,
  processor_stage::ProcessorStage, processor_state::ProcessorState, processor_subscriber::ProcessorSubscriber,
  signal::Signal, signal_dispatcher::SignalDispatcher, signal_mailbox::SignalMailbox, stream_error::StreamError,
};

/// Cooperative pairing of one processor actor with one signal mailbox.
///
/// The cell is the in-process runtime: outside parties dispatch signals
/// through the publisher, the subscription handles, or the subscriber facade,
/// and [`ProcessorCell::run_until_idle`] feeds them to the actor one at a
/// time. Construction already queues the initial `ExposedPublisher` signal.
pub struct ProcessorCell<In, Out> {
  actor:     ProcessorActor<In, Out>,
  mailbox:   SignalMailbox<In, Out>,
  publisher: ExposedPublisher<In, Out>,
}

impl<In: Send + 'static, Out: Send + Clone + 'static> ProcessorCell<In, Out> {
  /// Creates a cell and queues the publisher-exposure signal.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidSetting`] when the settings do not
  /// validate.
  pub fn new(settings: ProcessorSettings, stage: Box<dyn ProcessorStage<In, Out> + Send>) -> Result<Self, StreamError> {
    let mailbox = SignalMailbox::new();
    let dispatcher: Arc<dyn SignalDispatcher<In, Out>> = Arc::new(mailbox.clone());
    let actor = ProcessorActor::new(settings, stage, dispatcher.clone())?;
    let publisher = ExposedPublisher::new(dispatcher.clone());
    dispatcher.dispatch(Signal::ExposedPublisher(publisher.clone()));
    Ok(Self { actor, mailbox, publisher })
  }

  /// Returns the publisher handle downstream subscribers attach through.
  #[must_use]
  pub fn publisher(&self) -> ExposedPublisher<In, Out> {
    self.publisher.clone()
  }

  /// Returns the subscriber facade an upstream publisher feeds.
  #[must_use]
  pub fn subscriber(&self) -> ProcessorSubscriber<In, Out> {
    ProcessorSubscriber::new(Arc::new(self.mailbox.clone()))
  }

  /// Processes queued signals until the mailbox is empty. Returns how many
  /// signals were processed.
  pub fn run_until_idle(&mut self) -> usize {
    let mut processed = 0;
    while let Some(signal) = self.mailbox.take_next() {
      self.actor.receive(signal);
      processed += 1;
    }
    processed
  }

  /// Returns the actor's lifecycle state.
  #[must_use]
  pub const fn state(&self) -> ProcessorState {
    self.actor.state()
  }

  /// Returns the recorded failure cause, if the processor failed.
  #[must_use]
  pub const fn shutdown_reason(&self) -> Option<&StreamError> {
    self.actor.shutdown_reason()
  }

  /// Terminates the actor as if its runtime stopped it mid-stream.
  pub fn abrupt_terminate(&mut self) {
    self.actor.abrupt_terminate();
  }
}
