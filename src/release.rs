//! Latest-release resolution against the GitHub release index
//!
//! One read-only request per run. The response is parsed structurally
//! into a typed document, so a reordered or reformatted index response
//! fails with a precise diagnostic instead of reading the wrong field.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{InstallError, Result};

const RELEASE_INDEX_HOST: &str = "https://api.github.com";

/// The subset of the release document this tool reads
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Build the HTTP client used for both the index query and the archive
/// download. Constructed before any network call so a host without a
/// working TLS backend fails up front.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("tpdf-install/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| InstallError::HttpClientInit {
            reason: e.to_string(),
        })
}

/// Query the release index for the newest published version tag.
pub fn latest_tag(client: &Client, repo: &str) -> Result<String> {
    let url = format!("{RELEASE_INDEX_HOST}/repos/{repo}/releases/latest");

    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github+json");

    // Authenticated requests get a much higher rate limit
    if let Ok(token) = std::env::var("GITHUB_TOKEN").or_else(|_| std::env::var("GH_TOKEN")) {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    let response = request
        .send()
        .map_err(|e| InstallError::VersionResolutionFailed {
            reason: format!("request to {url} failed: {e}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::VersionResolutionFailed {
            reason: format!("{url} returned HTTP {status}"),
        });
    }

    let body = response
        .text()
        .map_err(|e| InstallError::VersionResolutionFailed {
            reason: format!("reading response from {url} failed: {e}"),
        })?;

    parse_latest_tag(&body)
}

/// Extract the version tag from a release index document.
fn parse_latest_tag(body: &str) -> Result<String> {
    let release: LatestRelease =
        serde_json::from_str(body).map_err(|e| InstallError::VersionResolutionFailed {
            reason: format!("malformed release document: {e}"),
        })?;

    if release.tag_name.is_empty() {
        return Err(InstallError::VersionResolutionFailed {
            reason: "release document has an empty tag_name".to_string(),
        });
    }

    Ok(release.tag_name)
}
