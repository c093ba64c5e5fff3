//! Template materialization into the root directory

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{InstallerError, Result, fs as fs_error};
use crate::manifest::{MANIFEST_DIR, Manifest};

const TEMPLATE_DIR: &str = "templates";
const ROOTDIR_TEMPLATE: &str = "rootdir";

/// Launcher scripts: (template name, installed name)
const LAUNCHERS: [(&str, &str); 2] = [("invoke.sh.in", "invoke.sh"), ("update.sh.in", "update.sh")];

/// Paths under the source directory that an installation reads
fn required_assets(source_dir: &Path) -> Vec<PathBuf> {
    let templates = source_dir.join(TEMPLATE_DIR);
    LAUNCHERS
        .iter()
        .map(|(template, _)| templates.join(template))
        .chain(std::iter::once(templates.join(ROOTDIR_TEMPLATE)))
        .chain(Manifest::ALL.iter().map(|m| m.path_in(source_dir)))
        .collect()
}

/// Fail unless every installer asset is present in `source_dir`
pub fn check_assets(source_dir: &Path) -> Result<()> {
    let missing: Vec<String> = required_assets(source_dir)
        .into_iter()
        .filter(|path| !path.exists())
        .filter_map(|path| {
            path.strip_prefix(source_dir)
                .ok()
                .map(|p| p.display().to_string())
        })
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(InstallerError::AssetsNotFound {
        source_dir: source_dir.display().to_string(),
        missing: missing.join(", "),
    })
}

/// Copy a directory tree, creating `dst` as needed. Existing files are overwritten.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| fs_error::io_error(format!("Failed to walk {}: {e}", src.display())))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| fs_error::io_error(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_error::create_dir_failed(&target, &e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| fs_error::copy_failed(entry.path(), &target, &e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| fs_error::io_error(format!("Failed to chmod {}: {e}", path.display())))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Copy launchers, manifests and the `rootdir` template tree into `root`.
///
/// Returns the paths of the installed launcher scripts.
pub fn materialize(source_dir: &Path, root: &Path) -> Result<Vec<PathBuf>> {
    let templates = source_dir.join(TEMPLATE_DIR);
    let mut launchers = Vec::with_capacity(LAUNCHERS.len());

    for (template, installed) in LAUNCHERS {
        let from = templates.join(template);
        let to = root.join(installed);
        fs::copy(&from, &to).map_err(|e| fs_error::copy_failed(&from, &to, &e))?;
        make_executable(&to)?;
        launchers.push(to);
    }

    let manifests = copy_tree(&source_dir.join(MANIFEST_DIR), &root.join(MANIFEST_DIR))?;
    let extras = copy_tree(&templates.join(ROOTDIR_TEMPLATE), root)?;
    tracing::info!(manifests, extras, "copied templates");

    Ok(launchers)
}
