//! Fatal error types for the runner.
//!
//! Only module loading can fail the run: everything scoped to one suite,
//! one test, or one data row is reported inline through the sink and never
//! crosses an invocation boundary as an error value.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ParikshaError {
    #[error("test module not found: {path}")]
    #[diagnostic(
        code(pariksha::module_not_found),
        help("check that the path points to a compiled test module")
    )]
    ModuleNotFound { path: PathBuf },

    #[error("failed to load test module {path}")]
    #[diagnostic(code(pariksha::module_load))]
    ModuleLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("{path} does not export a pariksha module entry point")]
    #[diagnostic(
        code(pariksha::missing_entry_point),
        help("declare the module with pariksha::declare_module!")
    )]
    MissingEntryPoint { path: PathBuf },
}
