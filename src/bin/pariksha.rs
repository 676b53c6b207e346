// Pariksha test runner.
// Usage: pariksha <MODULE>... [--no-color]

use std::process;

fn main() {
    process::exit(pariksha::cli::run());
}
