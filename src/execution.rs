//! The execution engine.
//!
//! Runs discovered test classes strictly sequentially: one instance per
//! class, the before hook once, every test in (priority, name) order with
//! data rows expanded into independent invocations, the after hook once.
//! A panic raised by one invocation is captured, recorded against that
//! invocation alone, and never aborts a sibling test, class, or module.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::assert::AssertionFailure;
use crate::discovery::{Discovered, TestClass, TestDiscoverer};
use crate::loader::TestModule;
use crate::model::Arg;
use crate::registry::{Hook, SuiteRegistry, Test};
use crate::report::ReportSink;

/// Pass/fail counts for one class or one whole module run. Counts only;
/// per-test records live on the sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn absorb(&mut self, other: Tally) {
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

pub struct TestExecutor;

impl TestExecutor {
    /// Runs every discovered class of the module in discovery order and
    /// aggregates the tallies. Rejected suites are reported and excluded.
    pub fn run_module(module: &TestModule, sink: &mut dyn ReportSink) -> Tally {
        Self::run_discovered(TestDiscoverer::discover(module), sink)
    }

    /// Same drive loop over a bare registry.
    pub fn run_registry(registry: &SuiteRegistry, sink: &mut dyn ReportSink) -> Tally {
        Self::run_discovered(TestDiscoverer::discover_registry(registry), sink)
    }

    fn run_discovered(discovered: Vec<Discovered<'_>>, sink: &mut dyn ReportSink) -> Tally {
        let mut total = Tally::default();
        for discovered in discovered {
            match discovered {
                Discovered::Runnable(class) => {
                    if let Some(tally) = Self::run_class(&class, sink) {
                        total.absorb(tally);
                    }
                }
                Discovered::Rejected { suite, reason } => {
                    sink.error(&format!("suite {} rejected: {}", suite, reason));
                }
            }
        }
        total
    }

    /// Runs one class. Returns `None` when the class is skipped (no
    /// zero-argument constructor) and therefore excluded from totals.
    pub fn run_class(class: &TestClass<'_>, sink: &mut dyn ReportSink) -> Option<Tally> {
        sink.suite_started(class.name, class.description);

        let Some(constructor) = class.constructor else {
            sink.warning(&format!(
                "no zero-argument constructor for {}; suite skipped",
                class.name
            ));
            return None;
        };
        let mut instance = constructor();

        Self::run_hook(class.before, "before-each", class.name, instance.as_mut(), sink);

        let mut tally = Tally::default();
        for test in Self::ordered_tests(class) {
            Self::run_test(test, instance.as_mut(), sink, &mut tally);
        }

        Self::run_hook(class.after, "after-each", class.name, instance.as_mut(), sink);

        sink.suite_summary(class.name, &tally);
        Some(tally)
    }

    /// Ordering contract: priority ascending, ties broken by name
    /// ascending. Stable and reproducible across runs.
    fn ordered_tests<'c, 'm>(class: &'c TestClass<'m>) -> Vec<&'m Test> {
        let mut tests = class.tests.clone();
        tests.sort_by(|a, b| {
            a.priority_key()
                .cmp(&b.priority_key())
                .then_with(|| a.name().cmp(b.name()))
        });
        tests
    }

    fn run_test(
        test: &Test,
        instance: &mut dyn Any,
        sink: &mut dyn ReportSink,
        tally: &mut Tally,
    ) {
        if test.rows().is_empty() {
            Self::invoke(test, instance, &[], test.name().to_string(), sink, tally);
            return;
        }

        for row in test.rows() {
            if !row.matches(test.params()) {
                sink.warning(&format!(
                    "parameter mismatch for {} {}; entry skipped",
                    test.name(),
                    row.label()
                ));
                continue;
            }
            let identity = format!("{} {}", test.name(), row.label());
            Self::invoke(test, instance, &row.args, identity, sink, tally);
        }
    }

    fn invoke(
        test: &Test,
        instance: &mut dyn Any,
        args: &[Arg],
        identity: String,
        sink: &mut dyn ReportSink,
        tally: &mut Tally,
    ) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| test.invoke(instance, args)));
        match outcome {
            Ok(()) => {
                tally.passed += 1;
                sink.test_passed(&identity);
            }
            Err(payload) => {
                tally.failed += 1;
                sink.test_failed(&identity, &panic_message(payload.as_ref()));
            }
        }
    }

    fn run_hook(
        hook: Option<&Hook>,
        kind: &str,
        suite: &str,
        instance: &mut dyn Any,
        sink: &mut dyn ReportSink,
    ) {
        let Some(hook) = hook else {
            sink.warning(&format!("no {} hook for {}", kind, suite));
            return;
        };
        // A failing hook is a configuration problem, not a per-test
        // failure: warn and proceed.
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| (hook.run)(instance))) {
            sink.warning(&format!(
                "{} hook '{}' of {} failed: {}",
                kind,
                hook.name,
                suite,
                panic_message(payload.as_ref())
            ));
        }
    }
}

fn panic_message(payload: &dyn Any) -> String {
    if let Some(failure) = payload.downcast_ref::<AssertionFailure>() {
        failure.message.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked with a non-string payload".to_string()
    }
}
