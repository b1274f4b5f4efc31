use crate::config::GoverConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::storage::InstallRepository;

pub struct UninstallCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
}

impl<'a> UninstallCommand<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform) -> Result<Self> {
        Ok(Self { config, platform })
    }

    pub fn execute(&self, versions: &[String]) -> Result<()> {
        let repository = InstallRepository::new(self.config, self.platform);

        for version in versions {
            if repository.is_installed(version) {
                log::info!("removing {}", repository.install_dir(version).display());
                repository.remove(version)?;
            }
            println!("{version} uninstalled");
        }

        Ok(())
    }
}
