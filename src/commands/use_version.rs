use crate::commands::install::InstallCommand;
use crate::config::GoverConfig;
use crate::error::{GoverError, Result};
use crate::platform::Platform;
use crate::storage::InstallRepository;
use std::fs;

/// Select a version for the calling shell only: writes `<home>/source.sh`
/// for the caller to source, leaving the persistent store untouched.
pub struct UseCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
    no_progress: bool,
}

impl<'a> UseCommand<'a> {
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
        let script = format!("export GOROOT=\"{}\"\n", install_dir.display());
        let script_path = self.config.go_home.join("source.sh");
        fs::write(&script_path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
        }

        println!("GOHOME: {}", self.config.go_home.display());
        println!("GOROOT: {}", install_dir.display());
        Ok(())
    }
}
