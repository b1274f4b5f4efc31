//! Platform detection and label mapping.
//!
//! The downloads page publishes human-readable OS and architecture labels
//! ("macOS", "x86-64"); the Go project names the same things with machine
//! identifiers ("darwin", "amd64"). This module owns both directions: the
//! running platform resolved once at startup, and the label tables used to
//! match published release rows against it.

use crate::archive::ArchiveFormat;
use crate::error::{GoverError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Resolve the running platform. Anything outside the supported set
    /// fails here, before any command runs.
    pub fn current() -> Result<Self> {
        Self::from_os_id(std::env::consts::OS)
    }

    pub fn from_os_id(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(GoverError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Identifier the Go project uses for this OS.
    pub fn os_id(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "darwin",
            Platform::Windows => "windows",
        }
    }

    pub fn archive_format(self) -> ArchiveFormat {
        match self {
            Platform::Linux | Platform::MacOs => ArchiveFormat::TarGz,
            Platform::Windows => ArchiveFormat::Zip,
        }
    }

    pub fn archive_suffix(self) -> &'static str {
        match self.archive_format() {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }

    pub fn default_go_home(self) -> PathBuf {
        match self {
            Platform::Linux | Platform::MacOs => PathBuf::from("/usr/local/go"),
            Platform::Windows => PathBuf::from("C:\\Program Files\\go"),
        }
    }

    /// File name of a release artifact for this platform and the running
    /// architecture, e.g. `go1.9.2.linux-amd64.tar.gz`.
    pub fn release_filename(self, version: &str) -> String {
        format!(
            "go{version}.{}-{}.{}",
            self.os_id(),
            current_arch_id(),
            self.archive_suffix()
        )
    }

    pub fn path_separator(self) -> char {
        match self {
            Platform::Windows => ';',
            _ => ':',
        }
    }
}

/// Identifier the Go project uses for the running process architecture.
pub fn current_arch_id() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    return "amd64";

    #[cfg(target_arch = "x86")]
    return "386";

    #[cfg(target_arch = "aarch64")]
    return "arm64";

    #[cfg(target_arch = "arm")]
    return "arm";

    #[cfg(all(target_arch = "powerpc64", target_endian = "little"))]
    return "ppc64le";

    #[cfg(target_arch = "s390x")]
    return "s390x";

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        all(target_arch = "powerpc64", target_endian = "little"),
        target_arch = "s390x"
    )))]
    return "unknown";
}

/// Map a published OS label from the downloads page to a Go OS identifier.
pub fn os_id_for_label(label: &str) -> Option<&'static str> {
    match label {
        "macOS" => Some("darwin"),
        "Linux" => Some("linux"),
        "Windows" => Some("windows"),
        "FreeBSD" => Some("freebsd"),
        _ => None,
    }
}

/// Map a published architecture label from the downloads page to a Go
/// architecture identifier.
pub fn arch_id_for_label(label: &str) -> Option<&'static str> {
    match label {
        "ARMv6" => Some("arm"),
        "ARMv8" => Some("arm64"),
        "ppc64le" => Some("ppc64le"),
        "s390x" => Some("s390x"),
        "x86" => Some("386"),
        "x86-64" => Some("amd64"),
        _ => None,
    }
}
