//! Scripted runner for tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::{Invocation, Runner, Status};
use crate::error::Result;

/// Records every invocation and answers from a script.
///
/// `execute` fails with the scripted status for the first invocation whose
/// rendered command line contains a registered pattern; everything else
/// succeeds. `capture` answers from a map keyed by program name.
#[derive(Default)]
pub struct FakeRunner {
    failures: Vec<(String, Status)>,
    banners: HashMap<String, String>,
    pub executed: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interpreter(mut self, program: &str, banner: &str) -> Self {
        self.banners.insert(program.to_string(), banner.to_string());
        self
    }

    pub fn failing_on(mut self, pattern: &str, code: i32) -> Self {
        self.failures
            .push((pattern.to_string(), Status::from_code(Some(code))));
        self
    }

    pub fn executed_lines(&self) -> Vec<String> {
        self.executed
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl Runner for FakeRunner {
    fn execute(&self, invocation: &Invocation) -> Result<Status> {
        self.executed.borrow_mut().push(invocation.clone());
        let line = invocation.to_string();
        Ok(self
            .failures
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map_or_else(Status::success, |(_, status)| *status))
    }

    fn capture(&self, invocation: &Invocation) -> Result<Option<String>> {
        Ok(self.banners.get(&invocation.program_name()).cloned())
    }
}
