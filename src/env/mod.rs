// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Persistent environment store.
//!
//! POSIX-like systems persist variables in a shell fragment (`~/.goverrc`)
//! that login shells are made to source; Windows persists them in the
//! per-user `HKEY_CURRENT_USER\Environment` registry key. Values written
//! here outlive the process; the current process environment is not touched.

mod path_edit;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as imp;
#[cfg(windows)]
use windows as imp;

use crate::error::Result;
use crate::platform::Platform;
use std::path::Path;

/// Read a variable from the persistent store. `None` when it was never set.
pub fn get_var(key: &str) -> Result<Option<String>> {
    imp::get_var(key)
}

/// Write a variable to the persistent store, creating it as needed.
pub fn set_var(key: &str, value: &str) -> Result<()> {
    imp::set_var(key, value)
}

/// Splice a version's `bin` directory into the persisted `PATH`: an existing
/// component under `home` ending in the platform `bin` suffix is replaced in
/// place, a verbatim duplicate leaves the value untouched, anything else
/// prepends.
pub fn add_path(entry: &Path, home: &Path, platform: Platform) -> Result<()> {
    let current = get_var("PATH")?.unwrap_or_default();
    let merged = path_edit::merge_path(
        &current,
        &entry.to_string_lossy(),
        &home.to_string_lossy(),
        platform.path_separator(),
    );

    if let Some(updated) = merged {
        set_var("PATH", &updated)?;
    }
    Ok(())
}

/// First-run bootstrap: make sure the store exists, carries a `PATH` entry
/// for the running executable and a default `GOHOME`, and (on POSIX
/// systems) is sourced by the user's shell startup files.
pub fn ensure_initialized(platform: Platform) -> Result<()> {
    imp::ensure_initialized(platform)
}
