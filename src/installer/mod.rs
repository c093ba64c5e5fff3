//! Installer orchestration
//!
//! The installation is a fixed sequence:
//! 1. Preflight: find a base interpreter and detect the platform
//! 2. Choose (or resume) the root directory
//! 3. Create the virtual environment
//! 4. Select and filter the dependency manifest
//! 5. Install dependencies and the pinned application release
//! 6. Copy templates into the root
//! 7. Hand over to the application's configuration script
//!
//! Every delegated step is fatal on failure. Nothing is rolled back; running
//! the installer again against the same root resumes from there.

mod steps;

#[cfg(test)]
mod tests;

pub use steps::Step;

use std::path::{Path, PathBuf};

use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result, step as step_error};
use crate::manifest::{self, Manifest};
use crate::platform::{self, Platform, PlatformProbe};
use crate::prompt::Prompter;
use crate::python::discovery::venv_bin_dir;
use crate::python::{self, Interpreter};
use crate::rootdir::{self, RootDir};
use crate::runner::{Invocation, Runner};
use crate::templates;
use crate::ui;

const VENV_DIR: &str = ".venv";

/// Outcome of a successful installation
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub root: RootDir,
    pub platform: Platform,
    pub manifest: Manifest,
    pub interpreter: Interpreter,
}

/// Result of preflight checks, threaded into the rest of the run
#[derive(Debug, Clone)]
pub struct Preflight {
    pub interpreter: Interpreter,
    pub platform: Platform,
}

/// Drives an installation through injected capabilities
pub struct Installer<'a> {
    config: &'a InstallerConfig,
    runner: &'a dyn Runner,
    prompter: &'a dyn Prompter,
    probe: &'a dyn PlatformProbe,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: &'a InstallerConfig,
        runner: &'a dyn Runner,
        prompter: &'a dyn Prompter,
        probe: &'a dyn PlatformProbe,
    ) -> Self {
        Self {
            config,
            runner,
            prompter,
            probe,
        }
    }

    /// Run the whole installation
    pub fn run(&self) -> Result<InstallReport> {
        let preflight = self.preflight()?;
        ui::info(&format!(
            "Using {} (Python {}) on {}",
            preflight.interpreter.path.display(),
            preflight.interpreter.version,
            preflight.platform
        ));

        self.prompter
            .pause("Press any key to start the installation, or Ctrl-C to cancel")?;

        let root = rootdir::select(self.prompter, &self.config.default_root())?;
        self.install_into(preflight, root)
    }

    /// Interpreter discovery, platform detection and an asset check.
    /// Touches no files.
    pub fn preflight(&self) -> Result<Preflight> {
        ui::step("Checking prerequisites");

        let interpreter = python::discover(
            self.runner,
            &self.config.python_candidates,
            &self.config.minimum_python,
        )?
        .ok_or_else(|| InstallerError::NoSuitablePython {
            minimum: self.config.minimum_python.to_string(),
            candidates: self.config.python_candidates.join(", "),
            instructions: self.config.instructions_url.clone(),
        })?;

        let platform = platform::detect(self.probe)?;
        templates::check_assets(&self.config.source_dir)?;

        Ok(Preflight {
            interpreter,
            platform,
        })
    }

    /// Everything after the root directory has been settled
    pub fn install_into(&self, preflight: Preflight, root: RootDir) -> Result<InstallReport> {
        let Preflight {
            interpreter,
            platform,
        } = preflight;
        let hint = platform.troubleshooting_hint(&self.config.troubleshooting_url);
        let venv = root.path.join(VENV_DIR);

        let interpreter = self.create_environment(&interpreter, &venv, root.resumed, &hint)?;
        let activation = steps::activation_env(&venv, std::env::var_os("PATH"));
        let delegate = |step: Step, invocation: Invocation| {
            self.delegate(step, steps::activate(invocation, &activation), &hint)
        };

        delegate(
            Step::UpgradePip,
            interpreter.module("pip").args(["install", "--upgrade", "pip"]),
        )?;

        let manifest = Manifest::select(&platform);
        let requirements = manifest::materialize(&self.config.source_dir, &root.path, &platform)?;
        delegate(
            Step::InstallDependencies,
            interpreter
                .module("pip")
                .args(["install", "--prefer-binary", "-r"])
                .arg(&requirements),
        )?;

        delegate(
            Step::InstallApplication,
            interpreter
                .module("pip")
                .arg("install")
                .arg(&self.config.archive_url),
        )?;

        ui::step("Copying templates");
        let launchers = templates::materialize(&self.config.source_dir, &root.path)?;
        for launcher in &launchers {
            ui::info(&launcher.display().to_string());
        }

        delegate(Step::Configure, self.configure_invocation(&venv, &root.path))?;

        Ok(InstallReport {
            root,
            platform,
            manifest,
            interpreter,
        })
    }

    fn create_environment(
        &self,
        base: &Interpreter,
        venv: &Path,
        resumed: bool,
        hint: &str,
    ) -> Result<Interpreter> {
        let inside = Interpreter::in_venv(venv, base.version);
        if resumed && inside.path.exists() {
            ui::step(Step::CreateEnvironment.title());
            ui::info(&format!("Reusing {}", venv.display()));
            return Ok(inside);
        }

        self.delegate(
            Step::CreateEnvironment,
            base.module("venv").arg(venv),
            hint,
        )?;
        Ok(inside)
    }

    fn configure_invocation(&self, venv: &Path, root: &Path) -> Invocation {
        let entry: PathBuf = venv_bin_dir(venv).join(&self.config.configure_entry_point);
        let mut root_arg = std::ffi::OsString::from("--root=");
        root_arg.push(root.as_os_str());
        Invocation::new(entry).arg(root_arg)
    }

    fn delegate(&self, step: Step, invocation: Invocation, hint: &str) -> Result<()> {
        ui::step(step.title());
        tracing::info!(step = ?step, command = %invocation, "delegating");

        let status = self.runner.execute(&invocation)?;
        if status.is_success() {
            Ok(())
        } else {
            tracing::error!(step = ?step, code = ?status.code(), "step failed");
            Err(step_error::failed(step.failure(), status.to_string(), hint))
        }
    }
}
