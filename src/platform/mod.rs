//! Host platform description
//!
//! The installer only distinguishes a small, fixed set of hosts: Linux or
//! macOS, on x86_64 or arm64, with or without an AMD GPU driver loaded.
//! Anything else is rejected before the installer touches the filesystem.

use std::fmt;

pub mod detection;

pub use detection::{PlatformProbe, SystemProbe, detect};

use crate::error::{InstallerError, Result};

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    Osx,
}

impl OsFamily {
    /// Map a `uname -s` style identifier to a family
    pub fn from_identifier(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("Linux") {
            Ok(Self::Linux)
        } else if raw.starts_with("Darwin") {
            Ok(Self::Osx)
        } else {
            Err(InstallerError::UnsupportedOs {
                name: raw.to_string(),
            })
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Osx => "osx",
        }
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Arm64,
}

impl Arch {
    /// Map a `uname -m` style identifier to an architecture
    pub fn from_identifier(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("x86_64") {
            Ok(Self::X86_64)
        } else if raw.starts_with("arm64") {
            Ok(Self::Arm64)
        } else {
            Err(InstallerError::UnsupportedArch {
                name: raw.to_string(),
            })
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }
}

/// GPU vendor, as far as manifest selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuVendor {
    Amd,
    Other,
}

impl GpuVendor {
    pub fn label(self) -> &'static str {
        match self {
            Self::Amd => "amd",
            Self::Other => "other",
        }
    }
}

/// Detected host platform. Computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: OsFamily,
    pub arch: Arch,
    pub gpu: GpuVendor,
}

impl Platform {
    pub fn new(os: OsFamily, arch: Arch, gpu: GpuVendor) -> Self {
        Self { os, arch, gpu }
    }

    /// Troubleshooting guidance shown when a delegated step fails
    pub fn troubleshooting_hint(&self, url: &str) -> String {
        let advice = match self.os {
            OsFamily::Osx => {
                "On macOS, make sure the Xcode command line tools are installed (xcode-select --install)."
            }
            OsFamily::Linux => {
                "On Linux, make sure your distribution's python3-venv and python3-dev packages are installed."
            }
        };
        format!("{advice} Troubleshooting: {url}")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} (gpu: {})",
            self.os.label(),
            self.arch.label(),
            self.gpu.label()
        )
    }
}
