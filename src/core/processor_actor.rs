
use alloc::{boxed::Box, sync::Arc};

use crate::core::{
  exposed_publisher::ExposedPublisher, input_buffer::InputBuffer, output_fan_out::OutputFanOut,
  processor_settings::ProcessorSettings, processor_stage::ProcessorStage, processor_state::ProcessorState,
  pump::Pump, pump_outcome::PumpOutcome, shutdown_reason::ShutdownReason, signal::Signal,
  signal_dispatcher::SignalDispatcher, stream_error::StreamError, stream_subscription::StreamSubscription,
  upstream_handle::UpstreamHandle,
};

/// The processor state machine.
///
/// Owns the input buffer, the fan-out, the pump, and one stage, and sequences
/// them through the lifecycle. It processes one inbound signal to completion
/// before the next; everything it owns is mutated exclusively from
/// [`ProcessorActor::receive`].
pub struct ProcessorActor<In, Out> {
  settings:          ProcessorSettings,
  stage:             Box<dyn ProcessorStage<In, Out> + Send>,
  dispatcher:        Arc<dyn SignalDispatcher<In, Out>>,
  state:             ProcessorState,
  exposed_publisher: Option<ExposedPublisher<In, Out>>,
  inputs:            InputBuffer<In>,
  outputs:           OutputFanOut<Out>,
  pump:              Pump,
  shutting_down:     bool,
  shutdown_reason:   Option<StreamError>,
}

impl<In: 'static, Out: Clone + 'static> ProcessorActor<In, Out> {
  /// Creates a processor in the waiting-for-publisher state.
  ///
  /// The constructor emits no signals; any outbound subscription a stage
  /// needs is deferred to its `publisher_exposed` hook.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidSetting`] when the settings do not
  /// validate.
  pub fn new(
    settings: ProcessorSettings,
    stage: Box<dyn ProcessorStage<In, Out> + Send>,
    dispatcher: Arc<dyn SignalDispatcher<In, Out>>,
  ) -> Result<Self, StreamError> {
    settings.validate()?;
    let outputs = OutputFanOut::new(settings.initial_fan_out_buffer_size(), settings.max_fan_out_buffer_size());
    Ok(Self {
      settings,
      stage,
      dispatcher,
      state: ProcessorState::WaitingExposedPublisher,
      exposed_publisher: None,
      inputs: InputBuffer::empty(),
      outputs,
      pump: Pump::new(),
      shutting_down: false,
      shutdown_reason: None,
    })
  }

  /// Returns the current lifecycle state.
  #[must_use]
  pub const fn state(&self) -> ProcessorState {
    self.state
  }

  /// Returns the recorded failure cause, if the processor failed.
  #[must_use]
  pub const fn shutdown_reason(&self) -> Option<&StreamError> {
    self.shutdown_reason.as_ref()
  }

  /// Processes one inbound signal to completion.
  pub fn receive(&mut self, signal: Signal<In, Out>) {
    match self.state {
      | ProcessorState::WaitingExposedPublisher => self.waiting_exposed_publisher(signal),
      | ProcessorState::WaitingForUpstream => self.waiting_for_upstream(signal),
      | ProcessorState::Running => self.running(signal),
      | ProcessorState::Flushing => self.flushing(signal),
      | ProcessorState::ShutDown => {
        if let Signal::OnSubscribe(handle) = signal {
          handle.cancel();
        }
      },
    }
  }

  /// Fails the stage as if it stopped without a graceful shutdown: live
  /// subscribers receive `on_error`, upstream is cancelled if known.
  pub fn abrupt_terminate(&mut self) {
    if self.state != ProcessorState::ShutDown {
      self.fail(StreamError::AbruptTermination);
    }
  }

  fn waiting_exposed_publisher(&mut self, signal: Signal<In, Out>) {
    match signal {
      | Signal::ExposedPublisher(publisher) => {
        self.exposed_publisher = Some(publisher);
        self.stage.publisher_exposed();
        self.state = ProcessorState::WaitingForUpstream;
      },
      | _ => self.fail(StreamError::ProtocolViolation { context: "first signal must expose the publisher" }),
    }
  }

  fn waiting_for_upstream(&mut self, signal: Signal<In, Out>) {
    match signal {
      | Signal::OnSubscribe(handle) => {
        self.attach_upstream(handle);
      },
      | Signal::OnComplete => {
        self.inputs = InputBuffer::empty();
        self.start_running();
      },
      | Signal::OnError(cause) => {
        self.inputs.fail(cause.clone());
        self.fail(cause);
      },
      | Signal::OnNext(_) => self.fail(StreamError::ProtocolViolation { context: "element before subscription" }),
      | Signal::ExposedPublisher(_) => {
        self.fail(StreamError::ProtocolViolation { context: "publisher exposed twice" });
      },
      | Signal::SubscribePending => self.subscribe_pending(),
      | Signal::RequestMore(id, n) => {
        self.outputs.more_requested(id, n);
        self.settle();
      },
      | Signal::Cancel(id) => {
        self.outputs.unregister_subscription(id);
        self.settle();
      },
    }
  }

  fn running(&mut self, signal: Signal<In, Out>) {
    match signal {
      | Signal::OnNext(element) => match self.inputs.enqueue(element) {
        | Ok(()) => self.pump_and_settle(),
        | Err(cause) => self.fail(cause),
      },
      | Signal::OnComplete => {
        self.inputs.complete();
        self.state = ProcessorState::Flushing;
        self.pump_and_settle();
      },
      | Signal::OnError(cause) => {
        self.inputs.fail(cause.clone());
        self.fail(cause);
      },
      | Signal::OnSubscribe(_) => self.fail(StreamError::ProtocolViolation { context: "upstream already subscribed" }),
      | Signal::ExposedPublisher(_) => {
        self.fail(StreamError::ProtocolViolation { context: "publisher exposed twice" });
      },
      | Signal::SubscribePending => {
        self.subscribe_pending();
        self.pump_and_settle();
      },
      | Signal::RequestMore(id, n) => {
        self.outputs.more_requested(id, n);
        self.pump_and_settle();
      },
      | Signal::Cancel(id) => {
        self.outputs.unregister_subscription(id);
        self.pump_and_settle();
      },
    }
  }

  fn flushing(&mut self, signal: Signal<In, Out>) {
    match signal {
      | Signal::OnSubscribe(_) => {
        self.fail(StreamError::ProtocolViolation { context: "subscription arrived during flush" });
      },
      | Signal::SubscribePending => {
        // Upstream already finished; a subscriber arriving now observes the
        // terminal signal and never an element.
        if let Some(publisher) = self.exposed_publisher.clone() {
          for subscriber in publisher.take_pending() {
            match &self.shutdown_reason {
              | Some(cause) => subscriber.on_error(cause.clone()),
              | None => subscriber.on_complete(),
            }
          }
        }
        self.pump_and_settle();
      },
      | Signal::RequestMore(id, n) => {
        self.outputs.more_requested(id, n);
        self.pump_and_settle();
      },
      | Signal::Cancel(id) => {
        self.outputs.unregister_subscription(id);
        self.pump_and_settle();
      },
      | Signal::OnNext(_) | Signal::OnComplete | Signal::OnError(_) | Signal::ExposedPublisher(_) => {},
    }
  }

  fn attach_upstream(&mut self, handle: Arc<dyn UpstreamHandle>) {
    self.inputs =
      InputBuffer::attached(handle, self.settings.initial_input_buffer_size(), self.settings.max_input_buffer_size());
    self.start_running();
  }

  fn start_running(&mut self) {
    self.pump.init(self.stage.initial_transfer_state());
    self.state = ProcessorState::Running;
    self.pump_and_settle();
  }

  fn subscribe_pending(&mut self) {
    if let Some(publisher) = self.exposed_publisher.clone() {
      for subscriber in publisher.take_pending() {
        if let Some(id) = self.outputs.register_subscriber(subscriber.clone()) {
          let handle: Arc<dyn UpstreamHandle> = Arc::new(StreamSubscription::new(id, self.dispatcher.clone()));
          subscriber.on_subscribe(handle);
        }
      }
    }
  }

  fn pump_and_settle(&mut self) {
    match self.pump.pump(self.stage.as_mut(), &mut self.inputs, &mut self.outputs) {
      | Ok(PumpOutcome::Suspended) => {},
      | Ok(PumpOutcome::Completed) => {
        if !self.shutting_down {
          self.shutting_down = true;
          self.inputs.cancel();
          self.state = ProcessorState::Flushing;
        }
        self.outputs.complete();
      },
      | Err(cause) => {
        self.fail(cause);
        return;
      },
    }
    self.settle();
  }

  fn settle(&mut self) {
    if self.state == ProcessorState::ShutDown {
      return;
    }
    if let Some(completed) = self.outputs.shutdown_outcome() {
      self.shutdown(completed);
    }
  }

  fn shutdown(&mut self, completed: bool) {
    if completed {
      self.shutdown_reason = None;
    }
    let reason = match &self.shutdown_reason {
      | Some(cause) => ShutdownReason::Failed(cause.clone()),
      | None => ShutdownReason::Completed,
    };
    if let Some(publisher) = &self.exposed_publisher {
      publisher.shutdown(reason);
    }
    self.state = ProcessorState::ShutDown;
  }

  fn fail(&mut self, cause: StreamError) {
    if self.state == ProcessorState::ShutDown {
      return;
    }
    self.shutdown_reason = Some(cause.clone());
    self.shutting_down = true;
    self.outputs.abort(cause.clone());
    self.inputs.cancel();
    if let Some(publisher) = &self.exposed_publisher {
      publisher.shutdown(ShutdownReason::Failed(cause));
    }
    self.state = ProcessorState::ShutDown;
  }
}
