//! Install target resolution
//!
//! The install directory comes from `--install-dir` / `TPDF_INSTALL_DIR`
//! when given, otherwise the user-local executable directory.

use std::path::PathBuf;

use crate::error::{InstallError, Result};
use crate::platform::TOOL_NAME;

/// Final filesystem destination of the installed executable
#[derive(Debug, Clone)]
pub struct InstallTarget {
    pub directory: PathBuf,
    pub binary_name: &'static str,
}

impl InstallTarget {
    /// Resolve the install target, preferring the operator's override.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        let directory = match override_dir {
            Some(dir) => dir,
            None => default_install_dir()?,
        };
        Ok(Self {
            directory,
            binary_name: TOOL_NAME,
        })
    }

    /// Full path of the installed executable.
    pub fn binary_path(&self) -> PathBuf {
        self.directory.join(self.binary_name)
    }
}

/// Default user-local bin directory.
///
/// `dirs::executable_dir()` honors `XDG_BIN_HOME` on Linux but reports
/// nothing on macOS, where `~/.local/bin` is used as the conventional
/// fallback.
fn default_install_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::executable_dir() {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".local").join("bin"))
        .ok_or(InstallError::NoHomeDirectory)
}
