//! Runtime-agnostic processor core.
//!
//! Everything in this module is single-threaded cooperative: a processor
//! mutates its buffers only while handling one signal at a time, and external
//! parties interact with it exclusively by dispatching [`Signal`]s.

/// Demand model type.
mod demand;
/// Publisher handle given to the materializer.
mod exposed_publisher;
/// Per-subscriber cursor over the fan-out buffer (internal).
mod fan_out_cursor;
/// Fan-out shutdown phases (internal).
mod fan_out_phase;
/// Bounded, batching upstream input buffer.
mod input_buffer;
/// Shared fan-out output buffer.
mod output_fan_out;
/// The processor state machine.
mod processor_actor;
/// Cooperative actor-plus-mailbox driver.
mod processor_cell;
/// Buffer sizing configuration.
mod processor_settings;
/// Stage variant capability.
mod processor_stage;
/// Lifecycle states.
mod processor_state;
/// Subscriber facade over a signal mailbox.
mod processor_subscriber;
/// Transfer-function executor.
mod pump;
/// Pump loop outcome.
mod pump_outcome;
/// Terminal reason reported by a publisher.
mod shutdown_reason;
/// Signal vocabulary.
mod signal;
/// Mailbox seam between processors and transports.
mod signal_dispatcher;
/// Spin-lock signal queue.
mod signal_mailbox;
/// Error definitions.
mod stream_error;
/// Subscription handle handed to downstream subscribers.
mod stream_subscription;
/// Downstream subscriber capability.
mod subscriber;
/// Subscription identifier.
mod subscription_id;
/// Buffer access window for transfer functions.
mod transfer_context;
/// Transfer readiness descriptor.
mod transfer_state;
/// One-to-one user transform stage.
mod transform_stage;
/// Upstream producer capability.
mod upstream_handle;

/// Test probes and the deterministic fuzz runner.
pub mod testing;

pub use demand::Demand;
pub use exposed_publisher::ExposedPublisher;
pub use input_buffer::InputBuffer;
pub use output_fan_out::OutputFanOut;
pub use processor_actor::ProcessorActor;
pub use processor_cell::ProcessorCell;
pub use processor_settings::ProcessorSettings;
pub use processor_stage::ProcessorStage;
pub use processor_state::ProcessorState;
pub use processor_subscriber::ProcessorSubscriber;
pub use pump::Pump;
pub use pump_outcome::PumpOutcome;
pub use shutdown_reason::ShutdownReason;
pub use signal::Signal;
pub use signal_dispatcher::SignalDispatcher;
pub use signal_mailbox::SignalMailbox;
pub use stream_error::StreamError;
pub use stream_subscription::StreamSubscription;
pub use subscriber::Subscriber;
pub use subscription_id::SubscriptionId;
pub use transfer_context::TransferContext;
pub use transfer_state::TransferState;
pub use transform_stage::TransformStage;
pub use upstream_handle::UpstreamHandle;
