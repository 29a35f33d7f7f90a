//! Common test utilities for tpdf-install integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A sandboxed install directory for integration tests
#[allow(dead_code)]
pub struct TestSandbox {
    /// Temporary directory
    pub temp: TempDir,
    /// Install directory inside the sandbox
    pub install_dir: PathBuf,
}

#[allow(dead_code)]
impl TestSandbox {
    /// Create a new sandbox with an empty install directory path
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let install_dir = temp.path().join("bin");
        Self { temp, install_dir }
    }

    /// Check if a file exists under the install directory
    pub fn installed(&self, name: &str) -> bool {
        self.install_dir.join(name).is_file()
    }

    /// Check if an installed file has the owner-execute bit
    #[cfg(unix)]
    pub fn is_executable(&self, name: &str) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(self.install_dir.join(name))
            .map(|m| m.permissions().mode() & 0o100 != 0)
            .unwrap_or(false)
    }

    /// Names of all entries in the install directory
    pub fn install_dir_entries(&self) -> Vec<String> {
        match std::fs::read_dir(&self.install_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Leftover scratch directories under the system temp dir
#[allow(dead_code)]
pub fn scratch_leftovers() -> Vec<PathBuf> {
    let base = std::env::temp_dir();
    match std::fs::read_dir(base) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("tpdf-install-"))
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[allow(dead_code)]
pub fn path_of(p: &Path) -> String {
    p.display().to_string()
}
