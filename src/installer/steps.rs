//! Delegated installation steps

use std::ffi::OsString;
use std::path::Path;

use crate::python::discovery::venv_bin_dir;
use crate::runner::Invocation;

/// A step whose work is done entirely by an external program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateEnvironment,
    UpgradePip,
    InstallDependencies,
    InstallApplication,
    Configure,
}

impl Step {
    pub fn title(self) -> &'static str {
        match self {
            Self::CreateEnvironment => "Creating the virtual environment",
            Self::UpgradePip => "Updating the package installer",
            Self::InstallDependencies => "Installing dependencies",
            Self::InstallApplication => "Installing the application",
            Self::Configure => "Running the configuration script",
        }
    }

    /// Message used when the step's command fails
    pub fn failure(self) -> &'static str {
        match self {
            Self::CreateEnvironment => "Virtual environment creation",
            Self::UpgradePip => "Package installer upgrade",
            Self::InstallDependencies => "Dependency installation",
            Self::InstallApplication => "Application installation",
            Self::Configure => "Configuration",
        }
    }
}

/// Environment variables that activate the virtual environment at `venv`
pub fn activation_env(venv: &Path, current_path: Option<OsString>) -> Vec<(OsString, OsString)> {
    let bin = venv_bin_dir(venv);
    let mut dirs = vec![bin];
    if let Some(path) = current_path.as_ref() {
        dirs.extend(std::env::split_paths(path));
    }
    let path = std::env::join_paths(dirs).unwrap_or_else(|_| venv_bin_dir(venv).into_os_string());

    vec![
        (OsString::from("VIRTUAL_ENV"), venv.as_os_str().to_os_string()),
        (OsString::from("PATH"), path),
    ]
}

/// Apply activation variables to an invocation
pub fn activate(invocation: Invocation, env: &[(OsString, OsString)]) -> Invocation {
    env.iter()
        .fold(invocation, |inv, (key, value)| inv.env(key, value))
}
