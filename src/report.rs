//! Reporting seam between the execution engine and the console.
//!
//! The engine emits events through [`ReportSink`] as the run unfolds;
//! warnings and failures are never batched. [`BufferSink`] collects events
//! for programmatic capture, the console implementation lives in
//! `cli::output`.

use std::path::Path;

use crate::execution::Tally;

pub trait ReportSink {
    fn module_started(&mut self, name: &str, path: &Path);
    fn module_summary(&mut self, name: &str, tally: &Tally);
    fn suite_started(&mut self, name: &str, description: Option<&str>);
    fn suite_summary(&mut self, name: &str, tally: &Tally);
    fn test_passed(&mut self, identity: &str);
    fn test_failed(&mut self, identity: &str, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// One recorded report event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    ModuleStarted { name: String },
    ModuleSummary { name: String, tally: Tally },
    SuiteStarted { name: String },
    SuiteSummary { name: String, tally: Tally },
    Passed { identity: String },
    Failed { identity: String, message: String },
    Warning { message: String },
    Error { message: String },
}

/// BufferSink: collects report events for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub events: Vec<ReportEvent>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Passed { identity } => Some(identity.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Failed { identity, message } => {
                    Some((identity.as_str(), message.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Pass/fail invocation identities in emission order.
    pub fn invocations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Passed { identity } => Some(identity.as_str()),
                ReportEvent::Failed { identity, .. } => Some(identity.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for BufferSink {
    fn module_started(&mut self, name: &str, _path: &Path) {
        self.events.push(ReportEvent::ModuleStarted {
            name: name.to_string(),
        });
    }

    fn module_summary(&mut self, name: &str, tally: &Tally) {
        self.events.push(ReportEvent::ModuleSummary {
            name: name.to_string(),
            tally: *tally,
        });
    }

    fn suite_started(&mut self, name: &str, _description: Option<&str>) {
        self.events.push(ReportEvent::SuiteStarted {
            name: name.to_string(),
        });
    }

    fn suite_summary(&mut self, name: &str, tally: &Tally) {
        self.events.push(ReportEvent::SuiteSummary {
            name: name.to_string(),
            tally: *tally,
        });
    }

    fn test_passed(&mut self, identity: &str) {
        self.events.push(ReportEvent::Passed {
            identity: identity.to_string(),
        });
    }

    fn test_failed(&mut self, identity: &str, message: &str) {
        self.events.push(ReportEvent::Failed {
            identity: identity.to_string(),
            message: message.to_string(),
        });
    }

    fn warning(&mut self, message: &str) {
        self.events.push(ReportEvent::Warning {
            message: message.to_string(),
        });
    }

    fn error(&mut self, message: &str) {
        self.events.push(ReportEvent::Error {
            message: message.to_string(),
        });
    }
}
