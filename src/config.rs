use crate::error::{GoverError, Result};
use crate::platform::Platform;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LISTING_URL: &str = "https://golang.org/dl";
const DEFAULT_DOWNLOAD_BASE: &str = "https://dl.google.com/go";

/// Resolved once in `main` and passed by reference to everything else.
///
/// Precedence per field: the persistent environment store, then the process
/// environment, then `<go_home>/config.toml`, then built-in defaults.
#[derive(Debug, Clone)]
pub struct GoverConfig {
    /// Directory holding one subdirectory per installed version.
    pub go_home: PathBuf,
    /// The currently selected version's root, if one was ever set.
    pub go_root: Option<PathBuf>,
    /// Single network duration; callers split it into connect and overall
    /// request timeouts.
    pub timeout: Duration,
    pub listing_url: String,
    pub download_base: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct FileConfig {
    timeout_secs: Option<u64>,
    listing_url: Option<String>,
    download_base: Option<String>,
}

impl FileConfig {
    fn load(go_home: &Path) -> Result<Self> {
        let config_path = go_home.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            log::debug!("config file not found at {config_path:?}, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: FileConfig = toml::from_str(&contents).map_err(|err| {
            GoverError::InvalidConfig(format!("failed to parse config.toml: {err}"))
        })?;

        log::debug!("loaded config from {config_path:?}");
        Ok(config)
    }
}

impl GoverConfig {
    pub fn load(platform: Platform) -> Result<Self> {
        // Store errors are tolerated here: an unreadable store falls through
        // to the process environment and defaults, like any unset variable.
        let go_home = resolve_go_home(
            crate::env::get_var("GOHOME").ok().flatten(),
            std::env::var("GOHOME").ok(),
            platform,
        );
        let go_root = resolve_go_root(
            crate::env::get_var("GOROOT").ok().flatten(),
            std::env::var("GOROOT").ok(),
        );

        let file = FileConfig::load(&go_home)?;
        let timeout = resolve_timeout(std::env::var("GOVER_TIMEOUT").ok(), file.timeout_secs)?;

        Ok(Self {
            go_home,
            go_root,
            timeout,
            listing_url: file
                .listing_url
                .unwrap_or_else(|| DEFAULT_LISTING_URL.to_string()),
            download_base: file
                .download_base
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_BASE.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_go_home(
    persisted: Option<String>,
    process: Option<String>,
    platform: Platform,
) -> PathBuf {
    non_empty(persisted)
        .or(non_empty(process))
        .map(PathBuf::from)
        .unwrap_or_else(|| platform.default_go_home())
}

fn resolve_go_root(persisted: Option<String>, process: Option<String>) -> Option<PathBuf> {
    non_empty(persisted).or(non_empty(process)).map(PathBuf::from)
}

fn resolve_timeout(env_value: Option<String>, file_value: Option<u64>) -> Result<Duration> {
    if let Some(raw) = non_empty(env_value) {
        let secs: u64 = raw.trim().parse().map_err(|_| {
            GoverError::InvalidConfig(format!("GOVER_TIMEOUT must be whole seconds, got '{raw}'"))
        })?;
        return Ok(Duration::from_secs(secs));
    }

    Ok(Duration::from_secs(file_value.unwrap_or(DEFAULT_TIMEOUT_SECS)))
}
