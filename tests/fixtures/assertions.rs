//! Hand-written assertion functions.
//!
//! Every assertion takes the test context first, reports failures through
//! it, and returns whether the assertion held. The forwarding and fail-fast
//! wrappers next to this file are generated from these declarations; run
//! `assertgen generate` after editing.

use std::fmt::Debug;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

/// Collects assertion failures for one test.
pub struct TestContext {
    failures: Vec<String>,
    aborted: bool,
}

impl TestContext {
    pub fn new() -> TestContext {
        TestContext {
            failures: Vec::new(),
            aborted: false,
        }
    }

    /// Record a failure message.
    pub fn error(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    /// Abort the running test.
    pub fn fail_now(&mut self) {
        self.aborted = true;
        panic!("test aborted by a failed requirement");
    }

    pub fn failed(&self) -> bool {
        !self.failures.is_empty() || self.aborted
    }
}

impl Default for TestContext {
    fn default() -> TestContext {
        TestContext::new()
    }
}

/// A deferred comparison evaluated by `condition`.
pub type Comparison = fn() -> bool;

/// A closure expected to panic, checked by `panics`.
pub type PanicTestFn = fn();

/// Build a fresh context for one test.
pub fn new_context() -> TestContext {
    TestContext::new()
}

/// Fail reports a failure through the test context.
pub fn fail(t: &mut TestContext, failure_message: &str) -> bool {
    t.error(truncate_message(failure_message, 1024));
    false
}

/// IsTrue asserts that the value is true.
///
/// ```ignore
/// assert::is_true(t, user.active, "user should be active");
/// ```
pub fn is_true(t: &mut TestContext, value: bool, msg: &str) -> bool {
    if !value {
        return fail(t, msg);
    }
    true
}

/// IsFalse asserts that the value is false.
pub fn is_false(t: &mut TestContext, value: bool, msg: &str) -> bool {
    if value {
        return fail(t, msg);
    }
    true
}

/// Equal asserts that two values are equal.
///
/// ```ignore
/// assert::equal(t, 123, 123, "123 and 123 should be equal");
/// ```
///
/// Returns whether the assertion was successful (true) or not (false).
pub fn equal<T: PartialEq + Debug>(t: &mut TestContext, expected: T, actual: T, msg: &str) -> bool {
    if expected != actual {
        let detail = format!("{}: expected {:?}, got {:?}", msg, expected, actual);
        return fail(t, &detail);
    }
    true
}

/// NotEqual asserts that two values are not equal.
///
/// Returns whether the assertion was successful (true) or not (false).
pub fn not_equal<T: PartialEq + Debug>(
    t: &mut TestContext,
    expected: T,
    actual: T,
    msg: &str,
) -> bool {
    if expected == actual {
        let detail = format!("{}: both values are {:?}", msg, actual);
        return fail(t, &detail);
    }
    true
}

/// Contains asserts that the haystack contains the needle.
///
/// ```ignore
/// assert::contains(t, "Hello World", "World", "greeting should mention World");
/// ```
pub fn contains(t: &mut TestContext, haystack: &str, needle: &str, msg: &str) -> bool {
    if !haystack.contains(needle) {
        let detail = format!("{}: {:?} does not contain {:?}", msg, haystack, needle);
        return fail(t, &detail);
    }
    true
}

/// NotContains asserts that the haystack does not contain the needle.
pub fn not_contains(t: &mut TestContext, haystack: &str, needle: &str, msg: &str) -> bool {
    if haystack.contains(needle) {
        let detail = format!("{}: {:?} contains {:?}", msg, haystack, needle);
        return fail(t, &detail);
    }
    true
}

/// Empty asserts that the value is an empty string.
pub fn empty(t: &mut TestContext, value: &str, msg: &str) -> bool {
    if !value.is_empty() {
        let detail = format!("{}: {:?} is not empty", msg, value);
        return fail(t, &detail);
    }
    true
}

/// NotEmpty asserts that the value is not an empty string.
pub fn not_empty(t: &mut TestContext, value: &str, msg: &str) -> bool {
    if value.is_empty() {
        return fail(t, msg);
    }
    true
}

/// Condition asserts that the comparison evaluates to true.
///
/// ```ignore
/// assert::condition(t, || balance > 0, "balance should stay positive");
/// ```
pub fn condition(t: &mut TestContext, comp: Comparison, msg: &str) -> bool {
    if !comp() {
        return fail(t, msg);
    }
    true
}

/// Panics asserts that the function panics when called.
pub fn panics(t: &mut TestContext, f: PanicTestFn, msg: &str) -> bool {
    if catch_unwind(AssertUnwindSafe(f)).is_ok() {
        let detail = format!("{}: function did not panic", msg);
        return fail(t, &detail);
    }
    true
}

/// WithinDuration asserts that two durations differ by at most `delta`.
pub fn within_duration(
    t: &mut TestContext,
    expected: Duration,
    actual: Duration,
    delta: Duration,
    msg: &str,
) -> bool {
    let diff = if expected > actual {
        expected - actual
    } else {
        actual - expected
    };
    if diff > delta {
        let detail = format!(
            "{}: durations differ by {:?}, allowed {:?}",
            msg, diff, delta
        );
        return fail(t, &detail);
    }
    true
}

/// FailureCount reports how many assertions have failed so far.
pub fn failure_count(t: &mut TestContext) -> usize {
    t.failures.len()
}

fn truncate_message(message: &str, limit: usize) -> &str {
    if message.len() <= limit {
        message
    } else {
        &message[..limit]
    }
}
