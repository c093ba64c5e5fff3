//! Error types and handling for envstrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into a handful of domains:
//! - platform: the host is not something we know how to install onto
//! - python: no usable base interpreter
//! - step: a delegated external command failed
//! - fs: filesystem problems while preparing the root directory
//! - config: the installer configuration could not be loaded

pub mod fs;
pub mod step;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Platform errors
    #[error("Unknown OS: {name}")]
    #[diagnostic(
        code(envstrap::platform::unsupported_os),
        help("This installer runs only on Linux or macOS")
    )]
    UnsupportedOs { name: String },

    #[error("Unknown system architecture: {name}")]
    #[diagnostic(
        code(envstrap::platform::unsupported_arch),
        help("This installer runs only on x86_64 or arm64")
    )]
    UnsupportedArch { name: String },

    // Python errors
    #[error("A suitable Python interpreter could not be found (tried: {candidates})")]
    #[diagnostic(
        code(envstrap::python::not_found),
        help("Please install Python {minimum} or higher before running this installer. See {instructions} for help.")
    )]
    NoSuitablePython {
        minimum: String,
        candidates: String,
        instructions: String,
    },

    #[error("Invalid version string: '{input}'")]
    #[diagnostic(code(envstrap::python::invalid_version))]
    InvalidVersion { input: String },

    // Delegated step errors
    #[error("{step} failed ({status})")]
    #[diagnostic(code(envstrap::step::failed), help("{hint}"))]
    StepFailed {
        step: String,
        status: String,
        hint: String,
    },

    #[error("Failed to start '{program}': {reason}")]
    #[diagnostic(
        code(envstrap::step::spawn_failed),
        help("Check that the program is installed and on your PATH")
    )]
    CommandSpawnFailed { program: String, reason: String },

    // File system errors
    #[error("Unable to create directory: {path}")]
    #[diagnostic(code(envstrap::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to copy '{from}' to '{to}': {reason}")]
    #[diagnostic(code(envstrap::fs::copy_failed))]
    FileCopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(envstrap::fs::manifest_not_found),
        help("Run the installer from the unpacked release directory, or set ENVSTRAP_SOURCE_DIR")
    )]
    ManifestNotFound { path: String },

    #[error("Installer files missing from {source_dir}: {missing}")]
    #[diagnostic(
        code(envstrap::fs::assets_not_found),
        help("Run the installer from the unpacked release directory, or pass --source / set ENVSTRAP_SOURCE_DIR")
    )]
    AssetsNotFound { source_dir: String, missing: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(envstrap::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(envstrap::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(envstrap::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Command line errors
    #[error("Unknown shell: {name}")]
    #[diagnostic(
        code(envstrap::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { name: String },

    // Interaction errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(code(envstrap::prompt::failed))]
    PromptFailed { message: String },

    #[error("Installation cancelled")]
    #[diagnostic(code(envstrap::prompt::cancelled))]
    InstallCancelled,
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for InstallerError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => InstallerError::InstallCancelled,
            other => InstallerError::PromptFailed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
