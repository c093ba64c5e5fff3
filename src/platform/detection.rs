//! Platform detection for the machine running the installer

use std::path::PathBuf;

use super::{Arch, GpuVendor, OsFamily, Platform};
use crate::error::Result;
use crate::runner::{Invocation, Runner, SystemRunner};

/// Source of raw host information
pub trait PlatformProbe {
    /// Raw OS identifier, as printed by `uname -s`
    fn os_name(&self) -> Result<String>;

    /// Raw CPU identifier, as printed by `uname -m`
    fn machine(&self) -> Result<String>;

    /// Whether the AMD GPU kernel driver is currently loaded
    fn has_amd_gpu(&self) -> bool;
}

/// Probe that asks the running system
pub struct SystemProbe {
    runner: SystemRunner,
    modules_path: PathBuf,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self {
            runner: SystemRunner,
            modules_path: PathBuf::from("/proc/modules"),
        }
    }
}

impl SystemProbe {
    fn uname(&self, flag: &str, fallback: &str) -> Result<String> {
        let output = self.runner.capture(&Invocation::new("uname").arg(flag))?;
        Ok(output.map_or_else(|| fallback.to_string(), |s| s.trim().to_string()))
    }
}

/// `uname -s` spelling of a compile-time OS name
fn uname_os(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        other => other,
    }
}

/// `uname -m` spelling of a compile-time architecture name
fn uname_machine(os: &str, arch: &str) -> &'static str {
    match (os, arch) {
        ("macos", "aarch64") => "arm64",
        (_, "x86_64") => "x86_64",
        (_, "aarch64") => "aarch64",
        _ => "unknown",
    }
}

impl PlatformProbe for SystemProbe {
    fn os_name(&self) -> Result<String> {
        self.uname("-s", uname_os(std::env::consts::OS))
    }

    fn machine(&self) -> Result<String> {
        self.uname(
            "-m",
            uname_machine(std::env::consts::OS, std::env::consts::ARCH),
        )
    }

    fn has_amd_gpu(&self) -> bool {
        std::fs::read_to_string(&self.modules_path)
            .map(|modules| module_loaded(&modules, "amdgpu"))
            .unwrap_or(false)
    }
}

/// Check a `/proc/modules` listing for a loaded module
fn module_loaded(listing: &str, module: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|name| name == module)
}

/// Detect the host platform, rejecting anything unsupported
pub fn detect(probe: &dyn PlatformProbe) -> Result<Platform> {
    let os = OsFamily::from_identifier(&probe.os_name()?)?;
    let arch = Arch::from_identifier(&probe.machine()?)?;

    let gpu = match os {
        OsFamily::Linux if probe.has_amd_gpu() => GpuVendor::Amd,
        _ => GpuVendor::Other,
    };

    let platform = Platform::new(os, arch, gpu);
    tracing::info!(%platform, "detected platform");
    Ok(platform)
}
