#[cfg(test)]
mod tests;

use crate::core::stream_error::StreamError;

/// Buffer sizing configuration supplied by the materializer.
///
/// Immutable after construction; a processor validates its settings once and
/// never resizes buffers in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorSettings {
  initial_input_buffer_size:   usize,
  max_input_buffer_size:       usize,
  initial_fan_out_buffer_size: usize,
  max_fan_out_buffer_size:     usize,
}

impl ProcessorSettings {
  /// Creates settings with the default sizes.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      initial_input_buffer_size:   4,
      max_input_buffer_size:       16,
      initial_fan_out_buffer_size: 4,
      max_fan_out_buffer_size:     16,
    }
  }

  /// Returns the initial upstream request count.
  #[must_use]
  pub const fn initial_input_buffer_size(&self) -> usize {
    self.initial_input_buffer_size
  }

  /// Returns the hard cap on in-flight input elements.
  #[must_use]
  pub const fn max_input_buffer_size(&self) -> usize {
    self.max_input_buffer_size
  }

  /// Returns the initial fan-out buffer reservation.
  #[must_use]
  pub const fn initial_fan_out_buffer_size(&self) -> usize {
    self.initial_fan_out_buffer_size
  }

  /// Returns the hard cap on buffered output elements.
  #[must_use]
  pub const fn max_fan_out_buffer_size(&self) -> usize {
    self.max_fan_out_buffer_size
  }

  /// Updates the initial upstream request count.
  #[must_use]
  pub const fn with_initial_input_buffer_size(mut self, size: usize) -> Self {
    self.initial_input_buffer_size = size;
    self
  }

  /// Updates the hard cap on in-flight input elements.
  #[must_use]
  pub const fn with_max_input_buffer_size(mut self, size: usize) -> Self {
    self.max_input_buffer_size = size;
    self
  }

  /// Updates the initial fan-out buffer reservation.
  #[must_use]
  pub const fn with_initial_fan_out_buffer_size(mut self, size: usize) -> Self {
    self.initial_fan_out_buffer_size = size;
    self
  }

  /// Updates the hard cap on buffered output elements.
  #[must_use]
  pub const fn with_max_fan_out_buffer_size(mut self, size: usize) -> Self {
    self.max_fan_out_buffer_size = size;
    self
  }

  /// Validates the configured sizes.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidSetting`] when an initial size is zero or
  /// exceeds its maximum, or when a maximum is not a power of two.
  pub const fn validate(&self) -> Result<(), StreamError> {
    if self.initial_input_buffer_size == 0 || self.initial_input_buffer_size > self.max_input_buffer_size {
      return Err(StreamError::InvalidSetting {
        name:  "initial_input_buffer_size",
        value: self.initial_input_buffer_size,
      });
    }
    if !self.max_input_buffer_size.is_power_of_two() {
      return Err(StreamError::InvalidSetting { name: "max_input_buffer_size", value: self.max_input_buffer_size });
    }
    if self.initial_fan_out_buffer_size == 0 || self.initial_fan_out_buffer_size > self.max_fan_out_buffer_size {
      return Err(StreamError::InvalidSetting {
        name:  "initial_fan_out_buffer_size",
        value: self.initial_fan_out_buffer_size,
      });
    }
    if !self.max_fan_out_buffer_size.is_power_of_two() {
      return Err(StreamError::InvalidSetting { name: "max_fan_out_buffer_size", value: self.max_fan_out_buffer_size });
    }
    Ok(())
  }
}

impl Default for ProcessorSettings {
  fn default() -> Self {
    Self::new()
  }
}
