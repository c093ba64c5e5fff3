//! Delegated step errors

use super::InstallerError;

/// Creates a step failure error
pub fn failed(
    step: impl Into<String>,
    status: impl Into<String>,
    hint: impl Into<String>,
) -> InstallerError {
    InstallerError::StepFailed {
        step: step.into(),
        status: status.into(),
        hint: hint.into(),
    }
}

/// Creates an error for a program that could not be started
pub fn spawn_failed(program: impl Into<String>, err: &std::io::Error) -> InstallerError {
    InstallerError::CommandSpawnFailed {
        program: program.into(),
        reason: err.to_string(),
    }
}
