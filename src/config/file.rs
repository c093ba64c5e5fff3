//! Optional `envstrap.yaml` overrides shipped next to the installer assets

use std::path::Path;

use serde::Deserialize;

use crate::error::{InstallerError, Result};

/// Name of the configuration file looked up in the source directory
pub const CONFIG_FILE: &str = "envstrap.yaml";

/// Every field is optional; missing fields keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct ConfigFile {
    pub root_dir_name: Option<String>,
    pub minimum_python: Option<String>,
    pub python_candidates: Option<Vec<String>>,
    pub archive_url: Option<String>,
    pub configure_entry_point: Option<String>,
    pub instructions_url: Option<String>,
    pub troubleshooting_url: Option<String>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| InstallerError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load `envstrap.yaml` from `dir`, or defaults if there is none
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(yaml) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                Self::from_yaml(&yaml, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(InstallerError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
