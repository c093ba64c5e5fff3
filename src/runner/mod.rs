//! Delegated process execution
//!
//! Every external program the installer drives (the base interpreter, `pip`,
//! the application's configuration entry point) goes through a [`Runner`].
//! The orchestrator only ever observes an exit [`Status`], which lets tests
//! swap in a scripted runner instead of touching real package managers.

mod dry_run;
mod system;

#[cfg(test)]
pub mod fake;

pub use dry_run::DryRunRunner;
pub use system::SystemRunner;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;

/// A single external command: program, arguments and extra environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Vec<(OsString, OsString)>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Program name as shown to the user
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit status of a delegated command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    code: Option<i32>,
}

impl Status {
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn is_success(self) -> bool {
        self.code == Some(0)
    }

    pub fn code(self) -> Option<i32> {
        self.code
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Capability for running external programs
pub trait Runner {
    /// Run the invocation to completion with inherited stdio
    fn execute(&self, invocation: &Invocation) -> Result<Status>;

    /// Run the invocation and return its combined stdout and stderr.
    ///
    /// Returns `Ok(None)` when the program does not exist.
    fn capture(&self, invocation: &Invocation) -> Result<Option<String>>;
}
