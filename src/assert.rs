//! Assertion helpers for test bodies.
//!
//! Every check either returns silently or raises an [`AssertionFailure`]
//! through `panic_any`. The execution engine captures any panic raised by a
//! test body and records it as that invocation's failure, so these helpers
//! carry no control flow of their own.

use std::any::{type_name, Any};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// The distinguished failure signal raised by a failed assertion.
///
/// The execution engine downcasts panic payloads to this type to recover the
/// diagnostic message; any other payload is reported as a plain panic.
#[derive(Debug)]
pub struct AssertionFailure {
    pub message: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn raise(message: String) -> ! {
    panic::panic_any(AssertionFailure { message })
}

/// Appends the caller's message, if any, after the built diagnostic.
fn with_context(base: String, message: &str) -> String {
    if message.is_empty() {
        base
    } else {
        format!("{} {}", base, message)
    }
}

/// Asserts structural equality.
///
/// With `Option` values this gives the null semantics of the framework:
/// `are_equal(None::<i32>, None)` passes, a `None` against a `Some` fails in
/// either direction.
pub fn are_equal<T: PartialEq + fmt::Debug>(expected: T, actual: T) {
    are_equal_with(expected, actual, "");
}

/// [`are_equal`] with a caller message appended to the diagnostic.
pub fn are_equal_with<T: PartialEq + fmt::Debug>(expected: T, actual: T, message: &str) {
    if expected != actual {
        raise(with_context(
            format!("Expected: {:?}. Actual: {:?}.", expected, actual),
            message,
        ));
    }
}

/// Asserts structural inequality. Two equal values fail, and so do two
/// `None`s: "not equal" cannot hold between values that compare equal by
/// absence.
pub fn are_not_equal<T: PartialEq + fmt::Debug>(not_expected: T, actual: T) {
    are_not_equal_with(not_expected, actual, "");
}

/// [`are_not_equal`] with a caller message appended to the diagnostic.
pub fn are_not_equal_with<T: PartialEq + fmt::Debug>(not_expected: T, actual: T, message: &str) {
    if not_expected == actual {
        raise(with_context(
            format!(
                "Expected any value except: {:?}. Actual: {:?}.",
                not_expected, actual
            ),
            message,
        ));
    }
}

/// Asserts that a condition holds.
pub fn is_true(condition: bool) {
    is_true_with(condition, "");
}

/// [`is_true`] with a caller message appended to the diagnostic.
pub fn is_true_with(condition: bool, message: &str) {
    if !condition {
        raise(with_context(
            "Expected condition to be true, but it was false.".to_string(),
            message,
        ));
    }
}

/// Asserts that a condition does not hold.
pub fn is_false(condition: bool) {
    is_false_with(condition, "");
}

/// [`is_false`] with a caller message appended to the diagnostic.
pub fn is_false_with(condition: bool, message: &str) {
    if condition {
        raise(with_context(
            "Expected condition to be false, but it was true.".to_string(),
            message,
        ));
    }
}

/// Fails unconditionally with the given message.
pub fn fail(message: impl Into<String>) -> ! {
    raise(message.into())
}

/// Asserts that `action` raises a failure whose payload is exactly of type
/// `E` (as raised with `std::panic::panic_any`).
///
/// Raising a different payload kind and raising nothing at all both fail,
/// with distinct messages.
pub fn throws<E: Any>(action: impl FnOnce()) {
    throws_with::<E>(action, "");
}

/// [`throws`] with a caller message appended to the diagnostic.
pub fn throws_with<E: Any>(action: impl FnOnce(), message: &str) {
    match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(()) => raise(with_context(
            format!(
                "Expected failure of type <{}> but none was raised.",
                type_name::<E>()
            ),
            message,
        )),
        Err(payload) => {
            if payload.downcast_ref::<E>().is_none() {
                raise(with_context(
                    format!(
                        "Expected failure of type <{}>. Actual: {}.",
                        type_name::<E>(),
                        describe_payload(payload.as_ref())
                    ),
                    message,
                ));
            }
        }
    }
}

fn describe_payload(payload: &dyn Any) -> String {
    if let Some(failure) = payload.downcast_ref::<AssertionFailure>() {
        format!("assertion failure <{}>", failure.message)
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic <{}>", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic <{}>", s)
    } else {
        "an opaque failure payload".to_string()
    }
}
