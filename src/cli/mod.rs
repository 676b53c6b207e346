//! The pariksha command-line interface.
//!
//! Orchestrates one full run: each module path is loaded, discovered,
//! executed, reported, and unloaded before the next path is touched. No
//! state crosses module boundaries.

use std::panic;
use std::path::Path;

use clap::Parser;

use crate::cli::args::ParikshaArgs;
use crate::cli::output::ConsoleSink;
use crate::errors::ParikshaError;
use crate::execution::{Tally, TestExecutor};
use crate::loader::ModuleLoader;
use crate::report::ReportSink;

pub mod args;
pub mod output;

/// The main entry point for the runner binary. Returns the process exit
/// code: 0 when every invocation passed, 1 when any failed, 2 on a fatal
/// error such as a missing module path.
pub fn run() -> i32 {
    let args = ParikshaArgs::parse();

    let mut sink = if args.no_color {
        ConsoleSink::new(termcolor::ColorChoice::Never)
    } else {
        ConsoleSink::auto()
    };

    // Panics raised by test bodies are captured by the engine; keep the
    // default hook from spraying backtraces over the report.
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));

    let mut any_failed = false;
    let mut fatal = None;
    for path in &args.modules {
        match run_module_path(path, &mut sink) {
            Ok(tally) => any_failed |= tally.failed > 0,
            Err(error) => {
                // A bad input path aborts the whole run.
                fatal = Some(error);
                break;
            }
        }
    }

    panic::set_hook(previous_hook);

    if let Some(error) = fatal {
        eprintln!("{:?}", miette::Report::new(error));
        return 2;
    }
    if any_failed {
        1
    } else {
        0
    }
}

fn run_module_path(path: &Path, sink: &mut dyn ReportSink) -> Result<Tally, ParikshaError> {
    let module = ModuleLoader::load(path)?;
    sink.module_started(module.name(), module.path());
    let tally = TestExecutor::run_module(&module, sink);
    sink.module_summary(module.name(), &tally);
    module.unload();
    Ok(tally)
}
