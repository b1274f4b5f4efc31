//! File-backed store for POSIX-like systems.
//!
//! Variables live in `~/.goverrc` as `export KEY="VALUE"` lines. Login
//! shells pick them up through a `source` line appended once to whichever
//! of `.bashrc`/`.zshrc` exist.

use crate::error::{GoverError, Result};
use crate::platform::Platform;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const RC_FILE_NAME: &str = ".goverrc";

fn rc_file() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GoverError::EnvStore("cannot determine home directory".to_string()))?;
    Ok(home.join(RC_FILE_NAME))
}

/// Keep `export KEY="VALUE"` lines; comments and anything else are ignored.
fn parse_exports(content: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(rest) = line.strip_prefix("export ") else {
            continue;
        };
        let Some((key, value)) = rest.split_once('=') else {
            continue;
        };

        let key = key.trim().trim_matches('"').to_string();
        let value = value.trim().trim_matches('"').to_string();
        if key.is_empty() {
            continue;
        }
        vars.push((key, value));
    }
    vars
}

fn render_exports(vars: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(&format!("export {key}=\"{value}\"\n"));
    }
    out
}

fn upsert(vars: &mut Vec<(String, String)>, key: &str, value: &str) {
    match vars.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value.to_string(),
        None => vars.push((key.to_string(), value.to_string())),
    }
}

fn read_vars() -> Result<Vec<(String, String)>> {
    let path = rc_file()?;
    match fs::read_to_string(&path) {
        Ok(content) => Ok(parse_exports(&content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(GoverError::EnvStore(format!(
            "cannot read {}: {err}",
            path.display()
        ))),
    }
}

pub fn get_var(key: &str) -> Result<Option<String>> {
    Ok(read_vars()?
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v))
}

pub fn set_var(key: &str, value: &str) -> Result<()> {
    let path = rc_file()?;
    let mut vars = read_vars()?;
    upsert(&mut vars, key, value);

    fs::write(&path, render_exports(&vars)).map_err(|err| {
        GoverError::EnvStore(format!("cannot write {}: {err}", path.display()))
    })?;
    Ok(())
}

pub fn ensure_initialized(platform: Platform) -> Result<()> {
    let rc = rc_file()?;

    if !rc.exists() {
        let exe_dir = executable_dir()?;
        set_var("PATH", &format!("{}:$PATH", exe_dir.display()))?;
        set_var("GOHOME", &platform.default_go_home().to_string_lossy())?;
    }

    ensure_sourced(&rc)
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

/// Append a `source` line to each existing shell startup file that does not
/// already carry one.
fn ensure_sourced(rc: &Path) -> Result<()> {
    let Some(home) = dirs::home_dir() else {
        return Ok(());
    };

    let source_line = format!("source {}", rc.display());
    for name in [".bashrc", ".zshrc"] {
        let profile = home.join(name);
        let content = match fs::read_to_string(&profile) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(GoverError::EnvStore(format!(
                    "cannot read {}: {err}",
                    profile.display()
                )));
            }
        };

        let already = content
            .lines()
            .any(|line| line.trim_end_matches('\r').starts_with(&source_line));
        if already {
            continue;
        }

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&profile)
            .map_err(|err| {
                GoverError::EnvStore(format!("cannot open {}: {err}", profile.display()))
            })?;
        writeln!(file, "{source_line}").map_err(|err| {
            GoverError::EnvStore(format!("cannot write {}: {err}", profile.display()))
        })?;
    }

    Ok(())
}
