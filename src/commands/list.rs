use crate::config::GoverConfig;
use crate::env;
use crate::error::Result;
use crate::platform::Platform;
use crate::releases::{HttpListingFetcher, VersionLister};
use crate::storage::InstallRepository;
use colored::Colorize;
use std::path::PathBuf;

pub struct ListCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
}

impl<'a> ListCommand<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform) -> Result<Self> {
        Ok(Self { config, platform })
    }

    /// One line per discoverable version: `>` marks the active one, `+`
    /// installed, `-` not installed; the version named by the persisted
    /// GOROOT gets a `(system)` tag.
    pub fn execute(&self) -> Result<()> {
        let lister = VersionLister::new(HttpListingFetcher::new(self.config), self.platform);
        let versions = lister.list_versions();

        let repository = InstallRepository::new(self.config, self.platform);
        let system_version = env::get_var("GOROOT")
            .ok()
            .flatten()
            .and_then(|root| {
                PathBuf::from(root.trim())
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            });

        for version in versions {
            let mut line = if repository.is_installed(&version) {
                if self.config.go_root.as_deref()
                    == Some(repository.install_dir(&version).as_path())
                {
                    format!("> {}", version.green().bold())
                } else {
                    format!("+ {}", version.cyan().bold())
                }
            } else {
                format!("- {}", version.white().bold())
            };

            if system_version.as_deref() == Some(version.as_str()) {
                line.push_str("(system)");
            }

            println!("{line}");
        }

        Ok(())
    }
}
