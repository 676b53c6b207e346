//! Suite registration.
//!
//! Test modules declare their contents at load time by registering [`Suite`]
//! values into a [`SuiteRegistry`]. The registry is the single source of
//! truth for discovery: it records suites in registration order and carries
//! every hook registration verbatim so discovery can detect ambiguous
//! configurations instead of silently picking one.

use std::any::{type_name, Any};

use crate::model::{Arg, DataRow, ParamKind};

/// A boxed suite instance. Constructed once per suite run via the registered
/// zero-argument constructor.
pub type Instance = Box<dyn Any>;

pub type Constructor = Box<dyn Fn() -> Instance>;
pub type HookFn = Box<dyn Fn(&mut dyn Any)>;
pub type TestFn = Box<dyn Fn(&mut dyn Any, &[Arg])>;

/// Collects every suite a module registers, in registration order.
pub struct SuiteRegistry {
    suites: Vec<Suite>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self { suites: Vec::new() }
    }

    pub fn register(&mut self, suite: Suite) {
        self.suites.push(suite);
    }

    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixture hook registration. The name is kept for diagnostics only.
pub struct Hook {
    pub name: String,
    pub run: HookFn,
}

/// Declarative description of one test class: a qualified name, an optional
/// zero-argument constructor, fixture hook registrations, and its tests.
///
/// # Examples
///
/// ```rust
/// use pariksha::registry::{Suite, Test};
///
/// #[derive(Default)]
/// struct Counter(i64);
///
/// let suite = Suite::new("CounterTests")
///     .construct(Counter::default)
///     .before_each("reset", |c: &mut Counter| c.0 = 0)
///     .test(Test::new("starts_at_zero", |c: &mut Counter| {
///         pariksha::assert::are_equal(0, c.0);
///     }));
/// assert_eq!(suite.tests().len(), 1);
/// ```
pub struct Suite {
    name: String,
    description: Option<String>,
    constructor: Option<Constructor>,
    before_hooks: Vec<Hook>,
    after_hooks: Vec<Hook>,
    tests: Vec<Test>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            constructor: None,
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Attaches a purely informational description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Registers the zero-argument constructor. A suite without one is
    /// skipped with a warning and contributes nothing to totals.
    pub fn construct<S, F>(mut self, ctor: F) -> Self
    where
        S: Any,
        F: Fn() -> S + 'static,
    {
        self.constructor = Some(Box::new(move || Box::new(ctor()) as Instance));
        self
    }

    /// Registers a before-each hook, run once per suite instance before any
    /// test. Registering more than one is an ambiguous configuration that
    /// discovery rejects.
    pub fn before_each<S, F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        S: Any,
        F: Fn(&mut S) + 'static,
    {
        self.before_hooks.push(Hook {
            name: name.into(),
            run: typed_hook(hook),
        });
        self
    }

    /// Registers an after-each hook, run once per suite instance after all
    /// tests. Same multiplicity rule as [`Suite::before_each`].
    pub fn after_each<S, F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        S: Any,
        F: Fn(&mut S) + 'static,
    {
        self.after_hooks.push(Hook {
            name: name.into(),
            run: typed_hook(hook),
        });
        self
    }

    pub fn test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn before_hooks(&self) -> &[Hook] {
        &self.before_hooks
    }

    pub fn after_hooks(&self) -> &[Hook] {
        &self.after_hooks
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }
}

/// Declarative description of one test method.
pub struct Test {
    name: String,
    priority: i32,
    description: Option<String>,
    params: Vec<ParamKind>,
    rows: Vec<DataRow>,
    run: TestFn,
}

impl Test {
    /// A test with no parameters; invoked exactly once with no arguments.
    pub fn new<S, F>(name: impl Into<String>, body: F) -> Self
    where
        S: Any,
        F: Fn(&mut S) + 'static,
    {
        Self {
            name: name.into(),
            priority: 0,
            description: None,
            params: Vec::new(),
            rows: Vec::new(),
            run: Box::new(move |instance, _args| body(downcast_instance::<S>(instance))),
        }
    }

    /// A parameterized test; invoked once per structurally matching data
    /// row, with that row's arguments.
    pub fn with_params<S, F>(name: impl Into<String>, params: &[ParamKind], body: F) -> Self
    where
        S: Any,
        F: Fn(&mut S, &[Arg]) + 'static,
    {
        Self {
            name: name.into(),
            priority: 0,
            description: None,
            params: params.to_vec(),
            rows: Vec::new(),
            run: Box::new(move |instance, args| body(downcast_instance::<S>(instance), args)),
        }
    }

    /// Sets the ordering key. Lower priorities run first; the default is 0.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attaches a purely informational description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Appends a data row. Declaration order is preserved.
    pub fn row(mut self, args: Vec<Arg>) -> Self {
        self.rows.push(DataRow::new(args));
        self
    }

    /// Appends a data row with a description used in its invocation
    /// identity.
    pub fn described_row(mut self, args: Vec<Arg>, text: impl Into<String>) -> Self {
        self.rows.push(DataRow::described(args, text));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority_key(&self) -> i32 {
        self.priority
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn invoke(&self, instance: &mut dyn Any, args: &[Arg]) {
        (self.run)(instance, args)
    }
}

fn typed_hook<S, F>(hook: F) -> HookFn
where
    S: Any,
    F: Fn(&mut S) + 'static,
{
    Box::new(move |instance| hook(downcast_instance::<S>(instance)))
}

fn downcast_instance<S: Any>(instance: &mut dyn Any) -> &mut S {
    match instance.downcast_mut::<S>() {
        Some(state) => state,
        // The constructor produced a different type than the body expects.
        // Raised inside the invocation boundary, so it surfaces as that
        // invocation's failure.
        None => panic!("suite instance is not a {}", type_name::<S>()),
    }
}
