//! Tests for core_kernel error types

use core_kernel::error::CoreError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("min_confidence must be within 0..=1");

    match error {
        CoreError::Validation(msg) => assert!(msg.contains("min_confidence")),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration_display() {
    let error = CoreError::configuration("CLAIM_AUTOMATION_ENABLED is not a bool");
    let display = error.to_string();

    assert!(display.starts_with("Configuration error"));
    assert!(display.contains("CLAIM_AUTOMATION_ENABLED"));
}

#[test]
fn test_core_error_validation_display() {
    let error = CoreError::validation("history_window_months must be at least 1");

    assert_eq!(error.to_string(), "Validation error: history_window_months must be at least 1");
}
