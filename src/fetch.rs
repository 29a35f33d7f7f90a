//! Fetch-and-install pipeline
//!
//! Downloads the release archive into the per-run scratch area, optionally
//! verifies its digest, unpacks it, and places the single executable in the
//! install directory. The final placement is staged through a temporary
//! file inside the install directory and persisted with an atomic rename,
//! so no failure or concurrent run can leave a partial binary behind. The
//! scratch area is released on every exit path.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use tar::Archive;
use walkdir::WalkDir;

use crate::artifact::ArtifactReference;
use crate::error::{InstallError, Result};
use crate::progress::Reporter;
use crate::scratch;
use crate::target::InstallTarget;

/// Run the pipeline. Returns the path of the installed executable.
pub fn run(
    client: &Client,
    artifact: &ArtifactReference,
    target: &InstallTarget,
    expected_sha256: Option<&str>,
    reporter: &Reporter,
) -> Result<PathBuf> {
    let scratch = scratch::create()?;
    let archive_path = scratch.path().join(&artifact.archive_name);

    download(client, &artifact.download_url, &archive_path, reporter)?;
    install_from_archive(&archive_path, scratch.path(), target, expected_sha256)
}

/// Steps after the network fetch: verify, unpack, locate, place.
fn install_from_archive(
    archive_path: &Path,
    scratch_dir: &Path,
    target: &InstallTarget,
    expected_sha256: Option<&str>,
) -> Result<PathBuf> {
    if let Some(expected) = expected_sha256 {
        verify_sha256(archive_path, expected)?;
    }

    let unpack_dir = scratch_dir.join("unpacked");
    unpack(archive_path, &unpack_dir)?;

    let unpacked_binary = find_binary(&unpack_dir, target.binary_name).ok_or_else(|| {
        InstallError::BinaryNotInArchive {
            archive: archive_name(archive_path),
            binary: target.binary_name.to_string(),
        }
    })?;

    place(&unpacked_binary, target)?;
    Ok(target.binary_path())
}

/// Stream the archive to `dest`, failing on any transport error,
/// non-success status or truncated body.
fn download(client: &Client, url: &str, dest: &Path, reporter: &Reporter) -> Result<u64> {
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| InstallError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    let expected_len = response.content_length();
    let file = File::create(dest).map_err(|e| InstallError::DownloadFailed {
        url: url.to_string(),
        reason: format!("writing {}: {e}", dest.display()),
    })?;

    let bar = reporter.download_bar(expected_len);
    let mut writer = bar.wrap_write(file);
    let received = response
        .copy_to(&mut writer)
        .map_err(|e| InstallError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    bar.finish_and_clear();

    if let Some(expected) = expected_len {
        if received != expected {
            return Err(InstallError::TruncatedDownload {
                url: url.to_string(),
                expected,
                received,
            });
        }
    }

    Ok(received)
}

/// Compare the archive's SHA-256 against the operator-supplied digest.
fn verify_sha256(archive_path: &Path, expected: &str) -> Result<()> {
    let mut file = File::open(archive_path).map_err(|e| InstallError::ExtractionFailed {
        archive: archive_name(archive_path),
        reason: e.to_string(),
    })?;

    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| InstallError::ExtractionFailed {
        archive: archive_name(archive_path),
        reason: e.to_string(),
    })?;
    let actual = format!("{:x}", hasher.finalize());

    let expected = expected.trim().to_ascii_lowercase();
    if actual != expected {
        return Err(InstallError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Unpack the gzipped tarball into `dest`.
fn unpack(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path).map_err(|e| InstallError::ExtractionFailed {
        archive: archive_name(archive_path),
        reason: e.to_string(),
    })?;

    Archive::new(GzDecoder::new(file))
        .unpack(dest)
        .map_err(|e| InstallError::ExtractionFailed {
            archive: archive_name(archive_path),
            reason: e.to_string(),
        })
}

/// Locate the expected executable in the unpacked tree. Release archives
/// normally hold the binary at the top level, but a single wrapping
/// directory is tolerated.
fn find_binary(root: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.path().to_path_buf())
}

/// Move the executable into the install directory under the target name,
/// replacing any prior file at that path.
fn place(unpacked: &Path, target: &InstallTarget) -> Result<()> {
    fs::create_dir_all(&target.directory).map_err(|e| InstallError::InstallDirCreateFailed {
        path: target.directory.display().to_string(),
        reason: e.to_string(),
    })?;

    // Stage inside the install directory so the final step is a rename on
    // the same filesystem.
    let mut staged = tempfile::Builder::new()
        .prefix(".tpdf-")
        .tempfile_in(&target.directory)
        .map_err(|e| InstallError::InstallWriteFailed {
            path: target.directory.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut source = File::open(unpacked).map_err(|e| InstallError::InstallWriteFailed {
        path: unpacked.display().to_string(),
        reason: e.to_string(),
    })?;
    io::copy(&mut source, staged.as_file_mut()).map_err(|e| InstallError::InstallWriteFailed {
        path: target.binary_path().display().to_string(),
        reason: e.to_string(),
    })?;

    set_owner_executable(staged.as_file())?;

    staged
        .persist(target.binary_path())
        .map_err(|e| InstallError::InstallWriteFailed {
            path: target.binary_path().display().to_string(),
            reason: e.error.to_string(),
        })?;
    Ok(())
}

#[cfg(unix)]
fn set_owner_executable(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let map_err = |e: io::Error| InstallError::InstallWriteFailed {
        path: "staged binary".to_string(),
        reason: e.to_string(),
    };
    let mut perms = file.metadata().map_err(map_err)?.permissions();
    perms.set_mode(0o755);
    file.set_permissions(perms).map_err(map_err)
}

#[cfg(not(unix))]
fn set_owner_executable(_file: &File) -> Result<()> {
    Ok(())
}

fn archive_name(archive_path: &Path) -> String {
    archive_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| archive_path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::InstallTarget;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use sha2::{Digest, Sha256};
    use tempfile::TempDir;

    /// Build a gzipped tarball holding one file at `entry_path`.
    fn make_archive(dir: &Path, entry_path: &str, contents: &[u8]) -> PathBuf {
        let archive_path = dir.join("tpdf-linux-x86_64.tar.gz");
        let file = File::create(&archive_path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, entry_path, contents).unwrap();

        builder.into_inner().unwrap().finish().unwrap();
        archive_path
    }

    fn sha256_hex(data: &[u8]) -> String {
        format!("{:x}", Sha256::digest(data))
    }

    fn target_in(dir: &Path) -> InstallTarget {
        InstallTarget::resolve(Some(dir.join("bin"))).unwrap()
    }

    #[test]
    fn installs_the_binary_with_exec_permission() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "tpdf", b"#!/bin/sh\necho tpdf\n");
        let target = target_in(sandbox.path());

        let installed =
            install_from_archive(&archive, sandbox.path(), &target, None).unwrap();

        assert_eq!(installed, target.binary_path());
        assert!(installed.is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&installed).unwrap().permissions().mode();
            assert_eq!(mode & 0o755, 0o755);
        }
    }

    #[test]
    fn tolerates_a_single_wrapping_directory() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "tpdf-linux-x86_64/tpdf", b"binary");
        let target = target_in(sandbox.path());

        let installed =
            install_from_archive(&archive, sandbox.path(), &target, None).unwrap();
        assert_eq!(fs::read(installed).unwrap(), b"binary");
    }

    #[test]
    fn reinstall_overwrites_the_previous_binary() {
        let sandbox = TempDir::new().unwrap();
        let target = target_in(sandbox.path());

        let first = make_archive(sandbox.path(), "tpdf", b"old");
        install_from_archive(&first, sandbox.path(), &target, None).unwrap();

        let scratch_two = sandbox.path().join("second-run");
        fs::create_dir_all(&scratch_two).unwrap();
        let second = make_archive(&scratch_two, "tpdf", b"new");
        install_from_archive(&second, &scratch_two, &target, None).unwrap();

        assert_eq!(fs::read(target.binary_path()).unwrap(), b"new");
        // A single regular file, no staging leftovers.
        let entries: Vec<_> = fs::read_dir(&target.directory).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn accepts_a_matching_sha256() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "tpdf", b"binary");
        let digest = sha256_hex(&fs::read(&archive).unwrap());
        let target = target_in(sandbox.path());

        install_from_archive(&archive, sandbox.path(), &target, Some(&digest)).unwrap();
        assert!(target.binary_path().is_file());
    }

    #[test]
    fn digest_comparison_is_case_insensitive() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "tpdf", b"binary");
        let digest = sha256_hex(&fs::read(&archive).unwrap()).to_uppercase();
        let target = target_in(sandbox.path());

        install_from_archive(&archive, sandbox.path(), &target, Some(&digest)).unwrap();
    }

    #[test]
    fn checksum_mismatch_leaves_the_target_untouched() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "tpdf", b"binary");
        let target = target_in(sandbox.path());

        let wrong = "0".repeat(64);
        let err =
            install_from_archive(&archive, sandbox.path(), &target, Some(&wrong)).unwrap_err();

        assert!(matches!(err, InstallError::ChecksumMismatch { .. }));
        assert!(!target.directory.exists());
    }

    #[test]
    fn corrupt_archive_fails_extraction_and_installs_nothing() {
        let sandbox = TempDir::new().unwrap();
        let archive = sandbox.path().join("tpdf-linux-x86_64.tar.gz");
        fs::write(&archive, b"this is not a gzip stream").unwrap();
        let target = target_in(sandbox.path());

        let err = install_from_archive(&archive, sandbox.path(), &target, None).unwrap_err();
        assert!(matches!(err, InstallError::ExtractionFailed { .. }));
        assert!(!target.directory.exists());
    }

    #[test]
    fn archive_without_the_binary_is_rejected() {
        let sandbox = TempDir::new().unwrap();
        let archive = make_archive(sandbox.path(), "README.md", b"docs only");
        let target = target_in(sandbox.path());

        let err = install_from_archive(&archive, sandbox.path(), &target, None).unwrap_err();
        assert!(matches!(err, InstallError::BinaryNotInArchive { .. }));
        assert!(!target.binary_path().exists());
    }

    #[test]
    fn failed_install_does_not_replace_an_existing_binary() {
        let sandbox = TempDir::new().unwrap();
        let target = target_in(sandbox.path());

        let good = make_archive(sandbox.path(), "tpdf", b"v1");
        install_from_archive(&good, sandbox.path(), &target, None).unwrap();

        let scratch_two = sandbox.path().join("second-run");
        fs::create_dir_all(&scratch_two).unwrap();
        let bad = make_archive(&scratch_two, "tpdf", b"v2");
        let wrong = "f".repeat(64);
        install_from_archive(&bad, &scratch_two, &target, Some(&wrong)).unwrap_err();

        assert_eq!(fs::read(target.binary_path()).unwrap(), b"v1");
    }

    #[test]
    #[ignore = "Requires network access to GitHub"]
    fn downloads_a_real_release_archive() {
        use crate::artifact;
        use crate::platform::Platform;
        use crate::release;

        let client = release::http_client().unwrap();
        let platform = Platform::current().unwrap();
        let tag = release::latest_tag(&client, "IWhitebird/tpdf").unwrap();
        let artifact = artifact::locate("IWhitebird/tpdf", &platform, &tag);

        let sandbox = TempDir::new().unwrap();
        let target = target_in(sandbox.path());
        let reporter = Reporter::new(true);
        let installed = run(&client, &artifact, &target, None, &reporter).unwrap();
        assert!(installed.is_file());
    }
}
