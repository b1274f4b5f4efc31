use crate::archive;
use crate::config::GoverConfig;
use crate::download::{self, AttohttpcClient};
use crate::error::{GoverError, Result};
use crate::platform::Platform;
use crate::progress;
use crate::storage::InstallRepository;
use crate::user_agent;
use std::fs;

pub struct InstallCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
    no_progress: bool,
}

impl<'a> InstallCommand<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform, no_progress: bool) -> Result<Self> {
        Ok(Self {
            config,
            platform,
            no_progress,
        })
    }

    pub fn execute(&self, versions: &[String]) -> Result<()> {
        for version in versions {
            self.install_one(version)?;
        }
        Ok(())
    }

    /// Download the release archive next to its install directory, unpack it
    /// into the home, and move the archive's top-level `go/` directory into
    /// place. The archive file stays behind on success; on failure whatever
    /// was already written stays on disk for inspection.
    pub(crate) fn install_one(&self, version: &str) -> Result<()> {
        let repository = InstallRepository::new(self.config, self.platform);

        if repository.is_installed(version) {
            println!("{version} already installed");
            return Ok(());
        }

        let url = format!(
            "{}/{}",
            self.config.download_base,
            self.platform.release_filename(version)
        );
        let archive_path = repository.archive_path(version);

        log::info!("downloading {url}");
        println!("{version} installing:");

        let client = AttohttpcClient::new(self.config.timeout, user_agent::download_client());
        let mut reporter = progress::reporter(self.no_progress, "Downloading");
        download::download_to_file(&client, &url, &archive_path, reporter.as_mut()).map_err(
            |err| match err {
                GoverError::Fetch(status) if status.starts_with("404") => {
                    GoverError::VersionNotAvailable(version.to_string())
                }
                other => other,
            },
        )?;

        println!("{version} unpacking:");
        let mut reporter = progress::reporter(self.no_progress, "Unpacking");
        archive::extract(
            &archive_path,
            &self.config.go_home,
            self.platform.archive_format(),
            reporter.as_mut(),
        )?;

        fs::rename(
            self.config.go_home.join("go"),
            repository.install_dir(version),
        )?;

        println!("{version} installed");
        Ok(())
    }
}
