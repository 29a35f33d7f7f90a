//! Error types for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every error is fatal: the pipeline stops at the first failure, reports a
//! single diagnostic and exits non-zero.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallError {
    // Platform errors
    #[error("Unsupported operating system: {report}")]
    #[diagnostic(
        code(tpdf_install::platform::unsupported_os),
        help("Prebuilt tpdf archives are published for Linux and macOS only")
    )]
    UnsupportedOs { report: String },

    #[error("Unsupported architecture: {report}")]
    #[diagnostic(
        code(tpdf_install::platform::unsupported_arch),
        help("Prebuilt tpdf archives are published for x86_64 and aarch64 only")
    )]
    UnsupportedArch { report: String },

    // Release index errors
    #[error("No usable HTTP client: {reason}")]
    #[diagnostic(
        code(tpdf_install::release::http_client),
        help("The bundled TLS backend failed to initialize on this host")
    )]
    HttpClientInit { reason: String },

    #[error("Could not resolve the latest release: {reason}")]
    #[diagnostic(
        code(tpdf_install::release::resolution_failed),
        help("Check the repository name and that it has published releases")
    )]
    VersionResolutionFailed { reason: String },

    // Download and extraction errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(code(tpdf_install::fetch::download_failed))]
    DownloadFailed { url: String, reason: String },

    #[error("Truncated download of {url}: expected {expected} bytes, received {received}")]
    #[diagnostic(code(tpdf_install::fetch::truncated_download))]
    TruncatedDownload {
        url: String,
        expected: u64,
        received: u64,
    },

    #[error("Archive checksum mismatch: expected {expected}, computed {actual}")]
    #[diagnostic(
        code(tpdf_install::fetch::checksum_mismatch),
        help("The downloaded archive does not match the digest passed via --sha256")
    )]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to extract {archive}: {reason}")]
    #[diagnostic(code(tpdf_install::fetch::extraction_failed))]
    ExtractionFailed { archive: String, reason: String },

    #[error("Archive {archive} does not contain the '{binary}' executable")]
    #[diagnostic(code(tpdf_install::fetch::binary_not_in_archive))]
    BinaryNotInArchive { archive: String, binary: String },

    // Install target errors
    #[error("Could not determine a home directory for the default install path")]
    #[diagnostic(
        code(tpdf_install::target::no_home_directory),
        help("Pass --install-dir or set TPDF_INSTALL_DIR")
    )]
    NoHomeDirectory,

    #[error("Failed to create install directory {path}: {reason}")]
    #[diagnostic(
        code(tpdf_install::target::dir_create_failed),
        help("Choose a writable directory with --install-dir or TPDF_INSTALL_DIR")
    )]
    InstallDirCreateFailed { path: String, reason: String },

    #[error("Failed to install binary at {path}: {reason}")]
    #[diagnostic(code(tpdf_install::target::write_failed))]
    InstallWriteFailed { path: String, reason: String },

    // Scratch area errors
    #[error("Failed to create scratch directory: {reason}")]
    #[diagnostic(code(tpdf_install::scratch::create_failed))]
    ScratchCreateFailed { reason: String },
}

/// Result type alias using InstallError
pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_os_names_the_report() {
        let err = InstallError::UnsupportedOs {
            report: "FreeBSD".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported operating system: FreeBSD");
    }

    #[test]
    fn checksum_mismatch_names_both_digests() {
        let err = InstallError::ChecksumMismatch {
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("aa"));
        assert!(message.contains("bb"));
    }

    #[test]
    fn truncated_download_reports_byte_counts() {
        let err = InstallError::TruncatedDownload {
            url: "https://example.test/a.tar.gz".to_string(),
            expected: 100,
            received: 42,
        };
        assert!(err.to_string().contains("expected 100 bytes, received 42"));
    }
}
