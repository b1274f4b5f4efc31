use crate::commands::install::InstallCommand;
use crate::config::GoverConfig;
use crate::env;
use crate::error::{GoverError, Result};
use crate::platform::Platform;
use crate::storage::InstallRepository;

/// Make a version the active one by rewriting the persistent store: GOROOT
/// points at its install directory and PATH gains its `bin` directory.
pub struct SetCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
    no_progress: bool,
}

impl<'a> SetCommand<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform, no_progress: bool) -> Result<Self> {
        Ok(Self {
            config,
            platform,
            no_progress,
        })
    }

    pub fn execute(&self, version: &str) -> Result<()> {
        let repository = InstallRepository::new(self.config, self.platform);

        if !repository.is_installed(version) {
            println!("{version} not found, will be installed");
            let install = InstallCommand::new(self.config, self.platform, self.no_progress)?;
            install.install_one(version)?;

            if !repository.is_installed(version) {
                return Err(GoverError::NotInstalled(version.to_string()));
            }
        }

        let install_dir = repository.install_dir(version);
        env::set_var("GOROOT", &install_dir.to_string_lossy())?;
        env::add_path(&install_dir.join("bin"), &self.config.go_home, self.platform)?;

        println!("GOHOME: {}", self.config.go_home.display());
        println!("GOROOT: {}", install_dir.display());
        Ok(())
    }
}
