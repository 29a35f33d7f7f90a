//! Deterministic release artifact addressing
//!
//! Pure derivation, no I/O: once the platform and version are known the
//! download URL is a fixed convention. The asset name must match what the
//! release pipeline publishes for each platform in the supported matrix.

use crate::platform::Platform;

const RELEASE_HOST: &str = "https://github.com";

/// Address of one downloadable release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    pub download_url: String,
    pub archive_name: String,
}

/// Derive the archive address for a `(repository, platform, version)` triple.
pub fn locate(repo: &str, platform: &Platform, version: &str) -> ArtifactReference {
    let archive_name = format!("{}.tar.gz", platform.asset_stem());
    let download_url =
        format!("{RELEASE_HOST}/{repo}/releases/download/{version}/{archive_name}");
    ArtifactReference {
        download_url,
        archive_name,
    }
}
