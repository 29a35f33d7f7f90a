//! Per-run scratch directory for download and extraction
//!
//! The scratch area is exclusive to one run: the name is randomized by
//! `tempfile`, and the returned guard removes the whole tree on drop, on
//! success and on every error path.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{InstallError, Result};

/// Absolute base for scratch directories, so a relative `TMPDIR` can never
/// land them under the current working directory.
fn scratch_base() -> PathBuf {
    let base = env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create the scratch directory for this run.
pub fn create() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("tpdf-install-")
        .tempdir_in(scratch_base())
        .map_err(|e| InstallError::ScratchCreateFailed {
            reason: e.to_string(),
        })
}
