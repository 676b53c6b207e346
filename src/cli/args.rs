//! Defines the command-line arguments for the pariksha runner.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::Parser;
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pariksha",
    version,
    about = "A minimal unit-test runner for isolated, compiled test modules."
)]
pub struct ParikshaArgs {
    /// Paths to compiled test modules, processed strictly in order.
    #[arg(required = true)]
    pub modules: Vec<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}
