//! Handles all user-facing output for the runner.
//!
//! Per-invocation PASSED/FAILED lines, warnings, and summary blocks are
//! colorized through `termcolor`. By centralizing output logic here, the
//! engine itself stays free of formatting concerns.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::execution::Tally;
use crate::report::ReportSink;

/// ConsoleSink: writes the unfolding run to stdout.
pub struct ConsoleSink {
    stream: StandardStream,
}

impl ConsoleSink {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    /// Colors when stdout is a terminal, plain text when piped.
    pub fn auto() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(choice)
    }

    fn colored_line(&mut self, color: Color, bold: bool, text: &str) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = writeln!(self.stream, "{}", text);
        let _ = self.stream.reset();
    }

    fn plain_line(&mut self, text: &str) {
        let _ = writeln!(self.stream, "{}", text);
    }

    fn summary_block(&mut self, tally: &Tally) {
        self.plain_line("**********************");
        self.plain_line(&format!("* Passed: {}/{}", tally.passed, tally.total()));
        self.plain_line(&format!("* Failed: {}", tally.failed));
        self.plain_line("**********************");
    }
}

impl ReportSink for ConsoleSink {
    fn module_started(&mut self, name: &str, path: &Path) {
        self.colored_line(
            Color::Cyan,
            true,
            &format!("Running tests from module {} ({})", name, path.display()),
        );
    }

    fn module_summary(&mut self, name: &str, tally: &Tally) {
        self.plain_line("####################################");
        self.plain_line(&format!("Summary of running tests from {}", name));
        self.summary_block(tally);
    }

    fn suite_started(&mut self, name: &str, description: Option<&str>) {
        self.plain_line(&format!("Running tests from class {}", name));
        if let Some(text) = description {
            self.plain_line(&format!("  {}", text));
        }
    }

    fn suite_summary(&mut self, _name: &str, tally: &Tally) {
        self.summary_block(tally);
    }

    fn test_passed(&mut self, identity: &str) {
        self.colored_line(Color::Green, false, &format!("{} : PASSED", identity));
    }

    fn test_failed(&mut self, identity: &str, message: &str) {
        self.colored_line(
            Color::Red,
            false,
            &format!("{} : FAILED\n  {}", identity, message),
        );
    }

    fn warning(&mut self, message: &str) {
        self.colored_line(Color::Yellow, false, &format!("Warning: {}", message));
    }

    fn error(&mut self, message: &str) {
        self.colored_line(Color::Red, true, &format!("Error: {}", message));
    }
}
