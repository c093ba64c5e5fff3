//! Runner backed by `std::process::Command`

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use super::{Invocation, Runner, Status};
use crate::error::{Result, step};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl Runner for SystemRunner {
    fn execute(&self, invocation: &Invocation) -> Result<Status> {
        tracing::debug!(command = %invocation, "executing");

        let status = Self::command(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| step::spawn_failed(invocation.program_name(), &e))?;

        tracing::debug!(command = %invocation, code = ?status.code(), "finished");
        Ok(Status::from_code(status.code()))
    }

    fn capture(&self, invocation: &Invocation) -> Result<Option<String>> {
        tracing::trace!(command = %invocation, "capturing");

        let output = match Self::command(invocation).stdin(Stdio::null()).output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(step::spawn_failed(invocation.program_name(), &e)),
        };

        // Older interpreters print their version banner on stderr
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(Some(text))
    }
}
