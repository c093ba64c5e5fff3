//! Runner that prints delegated commands instead of running them

use super::{Invocation, Runner, Status, SystemRunner};
use crate::error::Result;
use crate::ui;

/// Prints each delegated command and reports success.
///
/// Version probes still run for real so interpreter discovery behaves the
/// same as a normal install.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl Runner for DryRunRunner {
    fn execute(&self, invocation: &Invocation) -> Result<Status> {
        ui::dry_run(&invocation.to_string());
        Ok(Status::success())
    }

    fn capture(&self, invocation: &Invocation) -> Result<Option<String>> {
        SystemRunner.capture(invocation)
    }
}
