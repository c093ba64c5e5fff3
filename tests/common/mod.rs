//! Common test utilities for envstrap integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway installer source directory
pub struct TestSource {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the source root
    pub path: PathBuf,
}

impl TestSource {
    /// Create an empty source directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a source directory populated like a release bundle
    #[allow(dead_code)]
    pub fn with_assets() -> Self {
        let source = Self::new();
        source.write_file("templates/invoke.sh.in", "#!/bin/bash\n");
        source.write_file("templates/update.sh.in", "#!/bin/bash\n");
        source.write_file("templates/rootdir/configs/models.yaml", "{}\n");
        for manifest in [
            "requirements-lin-cuda.txt",
            "requirements-lin-amd.txt",
            "requirements-mac-mps-cpu.txt",
        ] {
            source.write_file(
                &format!("environments-and-requirements/{manifest}"),
                "torch\n-e .\n",
            );
        }
        source
    }

    /// Write a file in the source directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }
}

impl Default for TestSource {
    fn default() -> Self {
        Self::new()
    }
}
