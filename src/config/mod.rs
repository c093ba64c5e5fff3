//! Installer configuration
//!
//! Settings are resolved once at startup, in increasing precedence:
//! built-in defaults, `envstrap.yaml` in the source directory, `ENVSTRAP_*`
//! environment variables, and finally command line flags.

pub mod file;

use std::path::{Path, PathBuf};

pub use file::ConfigFile;

use crate::error::Result;
use crate::python::Version;

pub const ENV_SOURCE_DIR: &str = "ENVSTRAP_SOURCE_DIR";
pub const ENV_ROOT_NAME: &str = "ENVSTRAP_ROOT_NAME";
pub const ENV_MINIMUM_PYTHON: &str = "ENVSTRAP_MINIMUM_PYTHON";
pub const ENV_ARCHIVE_URL: &str = "ENVSTRAP_ARCHIVE_URL";

const DEFAULT_ROOT_DIR_NAME: &str = "invokeai";
const DEFAULT_MINIMUM_PYTHON: (u64, u64, u64) = (3, 9, 0);
const DEFAULT_PYTHON_CANDIDATES: [&str; 5] =
    ["python3.10", "python3.9", "python3", "python", "python3.11"];
const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/invoke-ai/InvokeAI/archive/refs/tags/v2.2.4.zip";
const DEFAULT_CONFIGURE_ENTRY_POINT: &str = "configure_invokeai.py";
const DEFAULT_INSTRUCTIONS_URL: &str =
    "https://invoke-ai.github.io/InvokeAI/installation/INSTALL_AUTOMATED/";
const DEFAULT_TROUBLESHOOTING_URL: &str =
    "https://invoke-ai.github.io/InvokeAI/installation/INSTALL_AUTOMATED/#troubleshooting";

/// Resolved installer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Directory holding `templates/` and the dependency manifests
    pub source_dir: PathBuf,
    /// Name of the root directory offered under the user's home
    pub root_dir_name: String,
    pub minimum_python: Version,
    /// Interpreter names probed in order
    pub python_candidates: Vec<String>,
    /// Pinned application release installed with pip
    pub archive_url: String,
    /// Configuration program installed into the environment's bin directory
    pub configure_entry_point: String,
    pub instructions_url: String,
    pub troubleshooting_url: String,
}

impl InstallerConfig {
    /// Built-in defaults for a given source directory
    pub fn with_source_dir(source_dir: impl Into<PathBuf>) -> Self {
        let (major, minor, patch) = DEFAULT_MINIMUM_PYTHON;
        Self {
            source_dir: source_dir.into(),
            root_dir_name: DEFAULT_ROOT_DIR_NAME.to_string(),
            minimum_python: Version::new(major, minor, patch),
            python_candidates: DEFAULT_PYTHON_CANDIDATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            configure_entry_point: DEFAULT_CONFIGURE_ENTRY_POINT.to_string(),
            instructions_url: DEFAULT_INSTRUCTIONS_URL.to_string(),
            troubleshooting_url: DEFAULT_TROUBLESHOOTING_URL.to_string(),
        }
    }

    /// Load configuration from the process environment
    pub fn load(source_override: Option<PathBuf>) -> Result<Self> {
        Self::load_with(source_override, |key| std::env::var(key).ok())
    }

    /// Load configuration using `env` to look up environment variables
    pub fn load_with<F>(source_override: Option<PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_dir = source_override
            .or_else(|| env(ENV_SOURCE_DIR).map(PathBuf::from))
            .unwrap_or_else(default_source_dir);

        let mut config = Self::with_source_dir(source_dir);
        let file = ConfigFile::load_from(&config.source_dir)?;
        config.apply_file(file)?;
        config.apply_env(env)?;

        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(name) = file.root_dir_name {
            self.root_dir_name = name;
        }
        if let Some(minimum) = file.minimum_python {
            self.minimum_python = minimum.parse()?;
        }
        if let Some(candidates) = file.python_candidates {
            self.python_candidates = candidates;
        }
        if let Some(url) = file.archive_url {
            self.archive_url = url;
        }
        if let Some(entry) = file.configure_entry_point {
            self.configure_entry_point = entry;
        }
        if let Some(url) = file.instructions_url {
            self.instructions_url = url;
        }
        if let Some(url) = file.troubleshooting_url {
            self.troubleshooting_url = url;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env(ENV_ROOT_NAME) {
            self.root_dir_name = name;
        }
        if let Some(minimum) = env(ENV_MINIMUM_PYTHON) {
            self.minimum_python = minimum.parse()?;
        }
        if let Some(url) = env(ENV_ARCHIVE_URL) {
            self.archive_url = url;
        }
        Ok(())
    }

    /// Default root directory offered to the user
    pub fn default_root(&self) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.root_dir_name)
    }
}

/// The executable's directory if it carries the installer assets, else the working directory
fn default_source_dir() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .filter(|dir| dir.join("templates").is_dir());

    beside_exe
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
