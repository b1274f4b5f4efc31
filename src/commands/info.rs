use crate::config::GoverConfig;
use crate::error::Result;
use crate::platform::{self, Platform};

pub struct InfoCommand<'a> {
    config: &'a GoverConfig,
    platform: Platform,
}

impl<'a> InfoCommand<'a> {
    pub fn new(config: &'a GoverConfig, platform: Platform) -> Result<Self> {
        Ok(Self { config, platform })
    }

    pub fn execute(&self) -> Result<()> {
        println!("GOOS: {}", self.platform.os_id());
        println!("GOARCH: {}", platform::current_arch_id());
        println!("GOHOME: {}", self.config.go_home.display());
        match &self.config.go_root {
            Some(go_root) => println!("GOROOT: {}", go_root.display()),
            None => println!("GOROOT: (not set)"),
        }
        Ok(())
    }
}
