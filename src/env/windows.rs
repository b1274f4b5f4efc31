//! Registry-backed store for Windows, using the per-user
//! `HKEY_CURRENT_USER\Environment` key.

use crate::error::{GoverError, Result};
use crate::platform::Platform;
use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};

fn environment_key() -> Result<RegKey> {
    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey_with_flags("Environment", KEY_READ | KEY_WRITE)
        .map_err(|err| GoverError::EnvStore(format!("cannot open HKCU\\Environment: {err}")))
}

pub fn get_var(key: &str) -> Result<Option<String>> {
    let env = environment_key()?;
    match env.get_value::<String, _>(key) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(GoverError::EnvStore(format!("cannot read {key}: {err}"))),
    }
}

pub fn set_var(key: &str, value: &str) -> Result<()> {
    let env = environment_key()?;
    env.set_value(key, &value)
        .map_err(|err| GoverError::EnvStore(format!("cannot write {key}: {err}")))
}

pub fn ensure_initialized(platform: Platform) -> Result<()> {
    let exe = std::env::current_exe()?;
    let exe_dir = exe.parent().unwrap_or(&exe);

    // Skip PATH seeding when running out of a temp dir (unpacked installer).
    if !exe_dir.starts_with(std::env::temp_dir()) {
        let current = get_var("PATH")?.unwrap_or_default();
        let dir = exe_dir.to_string_lossy();
        let present = current.split(';').any(|p| p.eq_ignore_ascii_case(&dir));
        if !present {
            let updated = if current.is_empty() {
                dir.to_string()
            } else {
                format!("{dir};{current}")
            };
            set_var("PATH", &updated)?;
        }
    }

    if get_var("GOHOME")?.unwrap_or_default().is_empty() {
        set_var("GOHOME", &platform.default_go_home().to_string_lossy())?;
    }

    Ok(())
}
