//! Resolves registered suites into runnable test classes.
//!
//! Discovery is a pure read of declared structure: it walks the module's
//! registry in registration order, resolves at most one before-each and one
//! after-each hook per suite, and surfaces ambiguous hook configurations as
//! rejections rather than picking one silently. It produces no output and
//! mutates nothing; the execution engine decides how rejections are
//! reported.

use crate::loader::TestModule;
use crate::registry::{Constructor, Hook, Suite, SuiteRegistry, Test};

/// The resolved, runnable view of one registered suite.
pub struct TestClass<'m> {
    pub name: &'m str,
    pub description: Option<&'m str>,
    pub constructor: Option<&'m Constructor>,
    pub before: Option<&'m Hook>,
    pub after: Option<&'m Hook>,
    /// Tests in registration order; the execution engine applies the
    /// priority/name ordering contract.
    pub tests: Vec<&'m Test>,
}

/// Outcome of resolving one suite.
pub enum Discovered<'m> {
    Runnable(TestClass<'m>),
    /// Ambiguous configuration; the suite must not run and must not count
    /// toward totals.
    Rejected { suite: &'m str, reason: String },
}

pub struct TestDiscoverer;

impl TestDiscoverer {
    /// Enumerates every registered suite of the module, in registration
    /// order.
    pub fn discover(module: &TestModule) -> Vec<Discovered<'_>> {
        Self::discover_registry(module.registry())
    }

    /// Same enumeration over a bare registry, for embedders and tests that
    /// build suites in-process.
    pub fn discover_registry(registry: &SuiteRegistry) -> Vec<Discovered<'_>> {
        registry.suites().iter().map(Self::resolve_suite).collect()
    }

    fn resolve_suite(suite: &Suite) -> Discovered<'_> {
        let before = match Self::single_hook(suite.before_hooks()) {
            Ok(hook) => hook,
            Err(count) => {
                return Discovered::Rejected {
                    suite: suite.name(),
                    reason: format!("{} before-each hooks registered, at most one allowed", count),
                }
            }
        };
        let after = match Self::single_hook(suite.after_hooks()) {
            Ok(hook) => hook,
            Err(count) => {
                return Discovered::Rejected {
                    suite: suite.name(),
                    reason: format!("{} after-each hooks registered, at most one allowed", count),
                }
            }
        };

        Discovered::Runnable(TestClass {
            name: suite.name(),
            description: suite.description(),
            constructor: suite.constructor(),
            before,
            after,
            tests: suite.tests().iter().collect(),
        })
    }

    fn single_hook(hooks: &[Hook]) -> Result<Option<&Hook>, usize> {
        match hooks {
            [] => Ok(None),
            [hook] => Ok(Some(hook)),
            more => Err(more.len()),
        }
    }
}
