//! Probe-based test utilities.
//!
//! The probes record every observed reactive-streams callback so tests can
//! assert on demand accounting, ordering, and terminal-signal delivery. The
//! fuzz runner drives a processor through deterministic pseudo-random signal
//! interleavings.

/// Deterministic signal-interleaving fuzz runner.
mod processor_fuzz_runner;
/// Recording downstream subscriber.
mod test_subscriber_probe;
/// Recording upstream handle.
mod test_upstream_probe;

pub use processor_fuzz_runner::ProcessorFuzzRunner;
pub use test_subscriber_probe::TestSubscriberProbe;
pub use test_upstream_probe::TestUpstreamProbe;
