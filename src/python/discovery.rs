//! Base interpreter discovery

use std::path::{Path, PathBuf};

use super::Version;
use crate::error::Result;
use crate::runner::{Invocation, Runner};

/// A version-gated Python interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub path: PathBuf,
    pub version: Version,
}

impl Interpreter {
    /// The interpreter living inside the virtual environment at `venv`
    pub fn in_venv(venv: &Path, version: Version) -> Self {
        Self {
            path: venv_bin_dir(venv).join(python_executable()),
            version,
        }
    }

    /// `<python> -m <module> <args...>`
    pub fn module(&self, module: &str) -> Invocation {
        Invocation::new(&self.path).args(["-m", module])
    }
}

/// Directory holding executables of the virtual environment at `venv`
pub fn venv_bin_dir(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

fn python_executable() -> &'static str {
    if cfg!(windows) { "python.exe" } else { "python" }
}

/// Probe `candidates` in order and return the first one reporting at least `minimum`
pub fn discover(
    runner: &dyn Runner,
    candidates: &[String],
    minimum: &Version,
) -> Result<Option<Interpreter>> {
    for candidate in candidates {
        let probe = Invocation::new(candidate).arg("--version");
        let Some(banner) = runner.capture(&probe)? else {
            tracing::debug!(candidate = %candidate, "not found");
            continue;
        };

        let Some(version) = Version::from_banner(&banner) else {
            tracing::debug!(candidate = %candidate, banner = %banner.trim(), "unrecognized version banner");
            continue;
        };

        if version.at_least(minimum) {
            tracing::info!(candidate = %candidate, %version, "selected interpreter");
            return Ok(Some(Interpreter {
                path: PathBuf::from(candidate),
                version,
            }));
        }

        tracing::debug!(candidate = %candidate, %version, %minimum, "too old");
    }

    Ok(None)
}
