//! File system errors

use std::path::Path;

use super::InstallerError;

/// Creates a directory creation error for `path`
pub fn create_dir_failed(path: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::DirectoryCreateFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a copy error for `from` -> `to`
pub fn copy_failed(from: &Path, to: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::FileCopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> InstallerError {
    InstallerError::IoError {
        message: message.into(),
    }
}
