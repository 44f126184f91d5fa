use alloc::string::ToString;

use super::StreamError;

#[test]
fn display_includes_violation_context() {
  let error = StreamError::ProtocolViolation { context: "first signal must expose the publisher" };
  assert_eq!(error.to_string(), "protocol violation: first signal must expose the publisher");
}

#[test]
fn display_includes_rejected_demand() {
  let error = StreamError::InvalidDemand { requested: 0 };
  assert_eq!(error.to_string(), "invalid demand: 0");
}

#[test]
fn display_includes_setting_name_and_value() {
  let error = StreamError::InvalidSetting { name: "max_input_buffer_size", value: 3 };
  assert_eq!(error.to_string(), "invalid setting: max_input_buffer_size=3");
}
