use crate::config::GoverConfig;
use crate::error::Result;
use crate::platform::Platform;
use std::fs;
use std::path::PathBuf;

/// On-disk view of installed toolchains: one directory per version under the
/// configured home, with a same-named archive file beside it.
///
/// Install state is the directory's existence; nothing else is tracked.
pub struct InstallRepository<'a> {
    config: &'a GoverConfig,
    platform: Platform,
}

impl<'a> InstallRepository<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform) -> Self {
        Self { config, platform }
    }

    pub fn install_dir(&self, version: &str) -> PathBuf {
        self.config.go_home.join(version)
    }

    pub fn archive_path(&self, version: &str) -> PathBuf {
        self.config
            .go_home
            .join(format!("{version}.{}", self.platform.archive_suffix()))
    }

    pub fn is_installed(&self, version: &str) -> bool {
        self.install_dir(version).is_dir()
    }

    /// Remove a version directory and, best effort, its sibling archive.
    pub fn remove(&self, version: &str) -> Result<()> {
        fs::remove_dir_all(self.install_dir(version))?;
        let _ = fs::remove_file(self.archive_path(version));
        Ok(())
    }
}
