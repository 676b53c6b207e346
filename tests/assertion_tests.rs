// Truth tables for the assertion helpers.

use std::panic::{self, AssertUnwindSafe};

use pariksha::assert::{self, AssertionFailure};

/// Runs `f` and returns the AssertionFailure message it raised, or None if
/// it returned silently.
fn capture(f: impl FnOnce()) -> Option<String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<AssertionFailure>() {
            Ok(failure) => Some(failure.message),
            Err(_) => panic!("expected an AssertionFailure payload"),
        },
    }
}

#[test]
fn are_equal_passes_on_equal_values() {
    assert_eq!(capture(|| assert::are_equal(5, 5)), None);
}

#[test]
fn are_equal_failure_names_both_values() {
    let message = capture(|| assert::are_equal(5, 6)).unwrap();
    assert!(message.contains('5'), "message was: {}", message);
    assert!(message.contains('6'), "message was: {}", message);
}

#[test]
fn are_equal_null_table() {
    assert_eq!(capture(|| assert::are_equal(None::<&str>, None)), None);
    assert!(capture(|| assert::are_equal(None, Some("x"))).is_some());
    assert!(capture(|| assert::are_equal(Some("x"), None)).is_some());
}

#[test]
fn are_not_equal_fails_on_two_nulls() {
    let message = capture(|| assert::are_not_equal(None::<i32>, None)).unwrap();
    assert!(message.contains("Expected any value except"));
}

#[test]
fn are_not_equal_table() {
    assert_eq!(capture(|| assert::are_not_equal(5, 6)), None);
    assert!(capture(|| assert::are_not_equal(5, 5)).is_some());
}

#[test]
fn boolean_checks() {
    assert_eq!(capture(|| assert::is_true(true)), None);
    assert!(capture(|| assert::is_true(false)).is_some());
    assert_eq!(capture(|| assert::is_false(false)), None);
    assert!(capture(|| assert::is_false(true)).is_some());
}

#[test]
fn unconditional_fail_preserves_message() {
    let message = capture(|| {
        assert::fail("broken invariant");
    })
    .unwrap();
    assert_eq!(message, "broken invariant");
}

#[test]
fn caller_message_is_appended_after_the_diagnostic() {
    let message = capture(|| assert::are_equal_with(5, 6, "totals drifted")).unwrap();
    assert!(
        message.starts_with("Expected: 5. Actual: 6."),
        "message was: {}",
        message
    );
    assert!(message.ends_with("totals drifted"), "message was: {}", message);
}

#[test]
fn empty_caller_message_leaves_the_diagnostic_untouched() {
    let plain = capture(|| assert::are_equal(5, 6)).unwrap();
    let with_empty = capture(|| assert::are_equal_with(5, 6, "")).unwrap();
    assert_eq!(plain, with_empty);
}

#[test]
fn caller_message_variants_stay_silent_on_success() {
    assert_eq!(capture(|| assert::are_equal_with(5, 5, "unused")), None);
    assert_eq!(capture(|| assert::are_not_equal_with(5, 6, "unused")), None);
    assert_eq!(capture(|| assert::is_true_with(true, "unused")), None);
    assert_eq!(capture(|| assert::is_false_with(false, "unused")), None);
}

#[test]
fn every_failing_check_carries_the_caller_message() {
    let not_equal = capture(|| assert::are_not_equal_with(7, 7, "ids collided")).unwrap();
    assert!(not_equal.ends_with("ids collided"), "message was: {}", not_equal);
    let truth = capture(|| assert::is_true_with(false, "flag must be set")).unwrap();
    assert!(truth.ends_with("flag must be set"), "message was: {}", truth);
    let falsity = capture(|| assert::is_false_with(true, "flag must stay clear")).unwrap();
    assert!(falsity.ends_with("flag must stay clear"), "message was: {}", falsity);
}

struct Boom;

#[test]
fn throws_passes_on_expected_payload_kind() {
    let outcome = capture(|| assert::throws::<Boom>(|| panic::panic_any(Boom)));
    assert_eq!(outcome, None);
}

#[test]
fn throws_fails_on_different_payload_kind() {
    let message = capture(|| assert::throws::<Boom>(|| panic!("something else"))).unwrap();
    assert!(message.contains("Expected failure of type"));
    assert!(message.contains("something else"));
}

#[test]
fn throws_fails_when_nothing_is_raised() {
    let message = capture(|| assert::throws::<Boom>(|| {})).unwrap();
    assert!(message.contains("none was raised"));
}

#[test]
fn throws_carries_the_caller_message() {
    let message =
        capture(|| assert::throws_with::<Boom>(|| {}, "guard never tripped")).unwrap();
    assert!(message.contains("none was raised"), "message was: {}", message);
    assert!(message.ends_with("guard never tripped"), "message was: {}", message);
}

#[test]
fn throws_failure_messages_are_distinct() {
    let wrong_kind = capture(|| assert::throws::<Boom>(|| panic!("other"))).unwrap();
    let nothing = capture(|| assert::throws::<Boom>(|| {})).unwrap();
    assert_ne!(wrong_kind, nothing);
    assert!(!wrong_kind.contains("none was raised"));
}
