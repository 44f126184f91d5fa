use super::ProcessorSettings;
use crate::core::stream_error::StreamError;

#[test]
fn default_settings_validate() {
  assert_eq!(ProcessorSettings::new().validate(), Ok(()));
}

#[test]
fn zero_initial_input_size_is_rejected() {
  let settings = ProcessorSettings::new().with_initial_input_buffer_size(0);
  assert_eq!(settings.validate(), Err(StreamError::InvalidSetting { name: "initial_input_buffer_size", value: 0 }));
}

#[test]
fn initial_above_max_is_rejected() {
  let settings = ProcessorSettings::new().with_initial_input_buffer_size(32).with_max_input_buffer_size(16);
  assert!(settings.validate().is_err());
}

#[test]
fn non_power_of_two_max_is_rejected() {
  let settings = ProcessorSettings::new().with_initial_input_buffer_size(1).with_max_input_buffer_size(12);
  assert_eq!(settings.validate(), Err(StreamError::InvalidSetting { name: "max_input_buffer_size", value: 12 }));
}

#[test]
fn fan_out_sizes_are_validated_independently() {
  let settings = ProcessorSettings::new().with_initial_fan_out_buffer_size(0);
  assert_eq!(
    settings.validate(),
    Err(StreamError::InvalidSetting { name: "initial_fan_out_buffer_size", value: 0 })
  );
}
