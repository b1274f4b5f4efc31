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

//! Blocking HTTP plumbing: whole-body fetches for the listing page and
//! streamed-to-disk downloads for release archives.

mod client;

pub use client::{AttohttpcClient, HttpClient, HttpResponse};

use crate::error::{GoverError, Result};
use crate::progress::ProgressReporter;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// GET a URL and return the whole body. Non-success statuses surface as
/// `Fetch` errors carrying the status text.
pub fn fetch(client: &dyn HttpClient, url: &str) -> Result<Vec<u8>> {
    let mut response = client.get(url)?;
    if !response.is_success() {
        return Err(GoverError::Fetch(response.status_text()));
    }

    let mut body = Vec::new();
    response.read_to_end(&mut body)?;
    Ok(body)
}

/// Stream a URL to `destination`, creating parent directories as needed and
/// reporting progress in bytes.
pub fn download_to_file(
    client: &dyn HttpClient,
    url: &str,
    destination: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    let mut response = client.get(url)?;
    if !response.is_success() {
        return Err(GoverError::Fetch(response.status_text()));
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    reporter.on_start(response.content_length().unwrap_or(0));

    let mut writer = BufWriter::new(File::create(destination)?);
    let mut buffer = [0u8; DOWNLOAD_CHUNK_SIZE];
    let mut downloaded = 0u64;
    loop {
        let n = response.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
        downloaded += n as u64;
        reporter.on_progress(downloaded);
    }
    writer.flush()?;

    reporter.on_complete();
    Ok(())
}
