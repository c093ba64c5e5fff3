//! Dependency manifest selection and filtering
//!
//! Three requirement files ship next to the installer, one per supported
//! platform family. The chosen file is copied into the root directory minus
//! any entries that only make sense inside a development checkout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result, fs as fs_error};
use crate::platform::{GpuVendor, OsFamily, Platform};

/// Directory (relative to the installer source) holding the manifests
pub const MANIFEST_DIR: &str = "environments-and-requirements";

/// Name of the filtered manifest written into the root directory
pub const ROOT_MANIFEST: &str = "requirements.txt";

/// One of the shipped dependency manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manifest {
    Mac,
    LinuxAmd,
    LinuxCuda,
}

impl Manifest {
    pub const ALL: [Self; 3] = [Self::Mac, Self::LinuxAmd, Self::LinuxCuda];

    /// Decision table from platform to manifest
    pub fn select(platform: &Platform) -> Self {
        match (platform.os, platform.gpu) {
            (OsFamily::Osx, _) => Self::Mac,
            (OsFamily::Linux, GpuVendor::Amd) => Self::LinuxAmd,
            (OsFamily::Linux, GpuVendor::Other) => Self::LinuxCuda,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Mac => "requirements-mac-mps-cpu.txt",
            Self::LinuxAmd => "requirements-lin-amd.txt",
            Self::LinuxCuda => "requirements-lin-cuda.txt",
        }
    }

    pub fn path_in(self, source_dir: &Path) -> PathBuf {
        source_dir.join(MANIFEST_DIR).join(self.file_name())
    }
}

/// Line without a trailing `#` comment. pip only treats `#` as a comment at
/// the start of a line or after whitespace.
fn strip_comment(line: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_blank {
            return &line[..i];
        }
        prev_blank = c.is_whitespace();
    }
    line
}

/// Whether a manifest line refers to the local checkout rather than a package
fn is_local_entry(line: &str) -> bool {
    let line = strip_comment(line).trim();
    let target = line
        .strip_prefix("--editable")
        .or_else(|| line.strip_prefix("-e"))
        .map_or(line, |rest| {
            let rest = rest.trim_start();
            rest.strip_prefix('=').unwrap_or(rest).trim_start()
        });

    target == "." || target.starts_with("./") || target.starts_with("../")
}

/// Drop editable and path-relative entries, preserving everything else in order
pub fn filter_local_entries(contents: &str) -> String {
    let mut filtered: String = contents
        .lines()
        .filter(|line| !is_local_entry(line))
        .collect::<Vec<_>>()
        .join("\n");
    if contents.ends_with('\n') && !filtered.is_empty() {
        filtered.push('\n');
    }
    filtered
}

/// Write the filtered manifest for `platform` into `root`, returning its path
pub fn materialize(source_dir: &Path, root: &Path, platform: &Platform) -> Result<PathBuf> {
    let manifest = Manifest::select(platform);
    let source = manifest.path_in(source_dir);
    tracing::info!(manifest = manifest.file_name(), "selected dependency manifest");

    let contents = fs::read_to_string(&source).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallerError::ManifestNotFound {
                path: source.display().to_string(),
            }
        } else {
            fs_error::io_error(format!("Failed to read {}: {e}", source.display()))
        }
    })?;

    let target = root.join(ROOT_MANIFEST);
    fs::write(&target, filter_local_entries(&contents))
        .map_err(|e| fs_error::copy_failed(&source, &target, &e))?;
    Ok(target)
}
