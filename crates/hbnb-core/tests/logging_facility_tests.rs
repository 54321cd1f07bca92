#![allow(clippy::unwrap_used, clippy::expect_used)]

use hbnb_core::errors::HbnbError;
use hbnb_core::logging_facility::init_test_capture;
use hbnb_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use hbnb_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, entity_key = "State.1");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("entity_key"), Some("State.1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = HbnbError::Integrity {
        entity: "Place".to_string(),
        reason: "FOREIGN KEY constraint failed".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let events = capture.events_for(op_name);
    assert_eq!(events[0].field("err_code"), Some("ERR_INTEGRITY"));
    assert_eq!(events[0].field("err_kind"), Some("Integrity"));
    assert!(events[0].field("error").unwrap().contains("FOREIGN KEY"));
}
