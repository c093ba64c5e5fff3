//! Interactive selection of the installation root directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};
use crate::prompt::Prompter;
use crate::ui;

/// The confirmed root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDir {
    pub path: PathBuf,
    /// The directory existed before and is being reused
    pub resumed: bool,
}

/// Expand a leading `~` and make the answer absolute
fn resolve_answer(answer: &str, default: &Path) -> PathBuf {
    let answer = answer.trim();
    if answer.is_empty() {
        return default.to_path_buf();
    }

    let expanded = match (answer.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(answer),
    };

    std::path::absolute(&expanded).unwrap_or(expanded)
}

/// Prompt until the user settles on an existing or freshly created directory
pub fn select(prompter: &dyn Prompter, default: &Path) -> Result<RootDir> {
    let default_answer = default.display().to_string();

    loop {
        let answer = prompter.ask(
            "Select the location for the installation root directory",
            &default_answer,
        )?;
        let path = resolve_answer(&answer, default);
        let exists = path.exists();

        if exists {
            if !path.is_dir() {
                ui::warn(&format!("{} exists and is not a directory", path.display()));
                continue;
            }
            if !prompter.confirm(
                &format!("{} already exists. Resume the installation there?", path.display()),
                true,
            )? {
                continue;
            }
        }

        if !prompter.confirm(&format!("Install into {}?", path.display()), true)? {
            continue;
        }

        if exists {
            tracing::info!(path = %path.display(), "resuming in existing root");
            return Ok(RootDir {
                path: canonical(path),
                resumed: true,
            });
        }

        match fs::create_dir_all(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "created root directory");
                return Ok(RootDir {
                    path: canonical(path),
                    resumed: false,
                });
            }
            Err(e) => {
                let err = fs_error::create_dir_failed(&path, &e);
                ui::warn(&format!("{err}: {e}"));
                tracing::debug!(path = %path.display(), error = %e, "root creation failed");
            }
        }
    }
}

fn canonical(path: PathBuf) -> PathBuf {
    dunce::canonicalize(&path).unwrap_or(path)
}
