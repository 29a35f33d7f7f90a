//! PATH guidance after installation
//!
//! Read-only: inspects the live environment and returns at most one line
//! of shell configuration for the user to apply themselves. Shell startup
//! files are never edited.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use normpath::PathExt;

/// Interactive shell families with dedicated guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFamily {
    Bash,
    Zsh,
    Fish,
    Other,
}

impl ShellFamily {
    /// Classify a `$SHELL` value by its basename.
    pub fn from_shell_path(shell: &str) -> Self {
        let name = Path::new(shell)
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("");
        match name {
            "bash" => ShellFamily::Bash,
            "zsh" => ShellFamily::Zsh,
            "fish" => ShellFamily::Fish,
            _ => ShellFamily::Other,
        }
    }

    /// The one configuration line for this family.
    pub fn guidance(&self, dir: &Path) -> String {
        let dir = dir.display();
        match self {
            ShellFamily::Bash => {
                format!("echo 'export PATH=\"{dir}:$PATH\"' >> ~/.bashrc")
            }
            ShellFamily::Zsh => {
                format!("echo 'export PATH=\"{dir}:$PATH\"' >> ~/.zshrc")
            }
            ShellFamily::Fish => format!("fish_add_path {dir}"),
            ShellFamily::Other => format!("export PATH=\"{dir}:$PATH\""),
        }
    }
}

/// Check whether `dir` appears as an entry of a `PATH`-like value.
pub fn dir_on_path(dir: &Path, path_value: &OsStr) -> bool {
    let wanted = normalize(dir);
    env::split_paths(path_value).any(|entry| normalize(&entry) == wanted)
}

/// Normalized form for entry comparison. Entries that cannot be resolved
/// (e.g. stale PATH members) fall back to their literal spelling.
fn normalize(path: &Path) -> PathBuf {
    path.normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Guidance for the live environment: `None` when the install directory is
/// already on `PATH`, otherwise the single line to apply.
pub fn advise(install_dir: &Path) -> Option<String> {
    let path_value = env::var_os("PATH").unwrap_or_default();
    if dir_on_path(install_dir, &path_value) {
        return None;
    }
    let shell = env::var("SHELL").unwrap_or_default();
    Some(ShellFamily::from_shell_path(&shell).guidance(install_dir))
}
