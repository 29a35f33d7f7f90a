//! Host platform identification
//!
//! Maps the host's OS and architecture reports to the canonical platform
//! tag used in release asset names. The tag format `tpdf-<os>-<arch>` is a
//! naming contract with the release pipeline: it is used verbatim as a URL
//! path segment, so any change here is a breaking change to published
//! asset names.

use std::fmt;

use crate::error::{InstallError, Result};

/// Name of the installed executable and prefix of every release asset
pub const TOOL_NAME: &str = "tpdf";

/// Operating systems with published prebuilt archives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
}

/// CPU architectures with published prebuilt archives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Os {
    /// Classify an OS report (a kernel name such as `Linux` or `Darwin`,
    /// or a compiled-in constant such as `linux` or `macos`).
    pub fn from_report(report: &str) -> Result<Self> {
        let lowered = report.to_ascii_lowercase();
        if lowered.starts_with("linux") {
            Ok(Os::Linux)
        } else if lowered.starts_with("darwin") || lowered == "macos" {
            Ok(Os::MacOs)
        } else {
            Err(InstallError::UnsupportedOs {
                report: report.to_string(),
            })
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::MacOs => write!(f, "macos"),
        }
    }
}

impl Arch {
    /// Classify a machine report (`uname -m` output or a compiled-in constant).
    pub fn from_report(report: &str) -> Result<Self> {
        match report {
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "aarch64" | "arm64" => Ok(Arch::Aarch64),
            other => Err(InstallError::UnsupportedArch {
                report: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Aarch64 => write!(f, "aarch64"),
        }
    }
}

/// The host platform, derived once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Classify a pair of host reports. Any pair outside the supported
    /// matrix is a terminal error; nothing is silently coerced.
    pub fn from_reports(os_report: &str, arch_report: &str) -> Result<Self> {
        Ok(Self {
            os: Os::from_report(os_report)?,
            arch: Arch::from_report(arch_report)?,
        })
    }

    /// Identify the platform this binary is running on.
    pub fn current() -> Result<Self> {
        Self::from_reports(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Release asset stem, e.g. `tpdf-linux-x86_64`.
    pub fn asset_stem(&self) -> String {
        format!("{}-{}-{}", TOOL_NAME, self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
