//! Compiled test module used by the loader's integration tests.
//!
//! Declares one suite with a full lifecycle: hooks, a prioritized plain
//! test, a parameterized test with one mismatched row, and one test that
//! always fails.

use pariksha::args;
use pariksha::assert;
use pariksha::model::{Arg, ParamKind};
use pariksha::registry::{Suite, SuiteRegistry, Test};

#[derive(Default)]
struct Calculator {
    total: i64,
}

fn register(registry: &mut SuiteRegistry) {
    registry.register(
        Suite::new("CalculatorTests")
            .construct(Calculator::default)
            .before_each("reset", |c: &mut Calculator| c.total = 0)
            .after_each("drain", |c: &mut Calculator| c.total = 0)
            .test(
                Test::new("starts_empty", |c: &mut Calculator| {
                    assert::are_equal(0, c.total);
                })
                .priority(-1),
            )
            .test(
                Test::with_params(
                    "accumulates",
                    &[ParamKind::Int, ParamKind::Int],
                    |c: &mut Calculator, args: &[Arg]| {
                        c.total += args[0].as_int().unwrap();
                        assert::are_equal(args[1].as_int().unwrap(), c.total);
                    },
                )
                .row(args![2, 2])
                .row(args![3, 5])
                .row(args!["two", 5]),
            )
            .test(Test::new("deliberate_failure", |_: &mut Calculator| {
                assert::fail("this one always fails");
            })),
    );
}

pariksha::declare_module!("fixture-module", deps: ["fixture_helper"], register);
