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

use crate::error::{GoverError, Result};
use crate::progress::ProgressReporter;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tar::Archive as TarArchive;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// Decoder selector keyed by a Go OS identifier. Identifiers with no
    /// registered decoder fail here, before anything is opened or written.
    pub fn for_os(os_id: &str) -> Result<Self> {
        match os_id {
            "linux" | "darwin" => Ok(ArchiveFormat::TarGz),
            "windows" => Ok(ArchiveFormat::Zip),
            other => Err(GoverError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Extract a release archive into `destination`.
///
/// Directory entries are skipped; parent directories are created as file
/// entries need them. Permission bits are preserved. On error, extraction
/// aborts and whatever was already written stays on disk.
pub fn extract(
    archive_path: &Path,
    destination: &Path,
    format: ArchiveFormat,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    fs::create_dir_all(destination)?;

    match format {
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, destination, reporter),
        ArchiveFormat::Zip => extract_zip(archive_path, destination, reporter),
    }
}

/// Proxy reader feeding cumulative byte counts to a progress reporter as the
/// compressed stream is consumed.
struct ProgressReader<'a, R: Read> {
    inner: R,
    bytes_read: u64,
    reporter: &'a mut dyn ProgressReporter,
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        self.reporter.on_progress(self.bytes_read);
        Ok(n)
    }
}

fn extract_tar_gz(
    archive_path: &Path,
    destination: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    let file = File::open(archive_path)?;
    reporter.on_start(file.metadata()?.len());

    {
        let gz = flate2::read::GzDecoder::new(ProgressReader {
            inner: file,
            bytes_read: 0,
            reporter: &mut *reporter,
        });
        let mut archive = TarArchive::new(gz);

        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.header().entry_type().is_dir() {
                continue;
            }

            let path = entry.path()?.into_owned();
            validate_entry_path(&path)?;

            let dest_path = destination.join(&path);
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mode = entry.header().mode()?;
            let mut out = File::create(&dest_path)?;
            io::copy(&mut entry, &mut out)?;
            set_permissions_from_mode(&dest_path, mode)?;
        }
    }

    reporter.on_complete();
    Ok(())
}

fn extract_zip(
    archive_path: &Path,
    destination: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    // Uncompressed total, summed up front.
    let mut total = 0u64;
    for i in 0..archive.len() {
        total += archive.by_index(i)?.size();
    }
    reporter.on_start(total);

    let mut processed = 0u64;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let path = match entry.enclosed_name() {
            Some(path) => path,
            None => {
                log::warn!("skipping zip entry with invalid name at index {i}");
                continue;
            }
        };
        validate_entry_path(&path)?;

        if entry.is_dir() {
            continue;
        }

        let dest_path = destination.join(&path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&dest_path)?;
        processed += io::copy(&mut entry, &mut out)?;

        if let Some(mode) = entry.unix_mode() {
            set_permissions_from_mode(&dest_path, mode)?;
        }

        reporter.on_progress(processed);
    }

    reporter.on_complete();
    Ok(())
}

/// Reject entries that would land outside the destination directory.
fn validate_entry_path(entry_path: &Path) -> Result<()> {
    for component in entry_path.components() {
        match component {
            std::path::Component::ParentDir => {
                return Err(GoverError::Extract(format!(
                    "archive contains path traversal: {entry_path:?}"
                )));
            }
            std::path::Component::RootDir | std::path::Component::Prefix(_) => {
                return Err(GoverError::Extract(format!(
                    "archive contains absolute path: {entry_path:?}"
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_permissions_from_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions_from_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct TestArchive {
        path: PathBuf,
        _temp_dir: tempfile::TempDir,
    }

    fn create_test_tar_gz() -> Result<TestArchive> {
        let temp_dir = tempdir()?;
        let tar_path = temp_dir.path().join("test.tar.gz");

        let file = File::create(&tar_path)?;
        let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(gz);

        let mut dir_header = tar::Header::new_gnu();
        dir_header.set_path("go/")?;
        dir_header.set_entry_type(tar::EntryType::Directory);
        dir_header.set_size(0);
        dir_header.set_mode(0o755);
        dir_header.set_cksum();
        builder.append(&dir_header, std::io::empty())?;

        let mut header = tar::Header::new_gnu();
        header.set_path("go/VERSION")?;
        header.set_size(6);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &b"go1.17"[..])?;

        let mut bin_header = tar::Header::new_gnu();
        bin_header.set_path("go/bin/go")?;
        bin_header.set_size(4);
        bin_header.set_mode(0o755);
        bin_header.set_cksum();
        builder.append(&bin_header, &b"#!go"[..])?;

        builder.finish()?;

        Ok(TestArchive {
            path: tar_path,
            _temp_dir: temp_dir,
        })
    }

    fn create_test_zip() -> Result<TestArchive> {
        let temp_dir = tempdir()?;
        let zip_path = temp_dir.path().join("test.zip");

        let file = File::create(&zip_path)?;
        let mut zip = zip::ZipWriter::new(file);

        let dir_options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default();
        zip.add_directory("go", dir_options)?;

        let options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);
        zip.start_file("go/VERSION", options)?;
        zip.write_all(b"go1.17")?;

        let bin_options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o755);
        zip.start_file("go/bin/go.exe", bin_options)?;
        zip.write_all(b"MZgo")?;

        zip.finish()?;

        Ok(TestArchive {
            path: zip_path,
            _temp_dir: temp_dir,
        })
    }

    #[test]
    fn test_format_selector() {
        assert_eq!(ArchiveFormat::for_os("linux").unwrap(), ArchiveFormat::TarGz);
        assert_eq!(
            ArchiveFormat::for_os("darwin").unwrap(),
            ArchiveFormat::TarGz
        );
        assert_eq!(ArchiveFormat::for_os("windows").unwrap(), ArchiveFormat::Zip);
    }

    #[test]
    fn test_format_selector_unsupported() {
        let err = ArchiveFormat::for_os("freebsd").unwrap_err();
        assert!(matches!(err, GoverError::UnsupportedPlatform(os) if os == "freebsd"));
    }

    #[test]
    fn test_extract_tar_gz_round_trip() -> Result<()> {
        let archive = create_test_tar_gz()?;
        let dest_dir = tempdir()?;

        extract(
            &archive.path,
            dest_dir.path(),
            ArchiveFormat::TarGz,
            &mut SilentReporter,
        )?;

        let version_file = dest_dir.path().join("go/VERSION");
        assert!(version_file.is_file());
        assert_eq!(fs::read_to_string(&version_file)?, "go1.17");

        let bin_file = dest_dir.path().join("go/bin/go");
        assert!(bin_file.is_file());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            assert_eq!(fs::metadata(&version_file)?.permissions().mode() & 0o777, 0o644);
            assert_eq!(fs::metadata(&bin_file)?.permissions().mode() & 0o777, 0o755);
        }

        Ok(())
    }

    #[test]
    fn test_extract_zip_round_trip() -> Result<()> {
        let archive = create_test_zip()?;
        let dest_dir = tempdir()?;

        extract(
            &archive.path,
            dest_dir.path(),
            ArchiveFormat::Zip,
            &mut SilentReporter,
        )?;

        let version_file = dest_dir.path().join("go/VERSION");
        assert!(version_file.is_file());
        assert_eq!(fs::read_to_string(&version_file)?, "go1.17");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let bin_file = dest_dir.path().join("go/bin/go.exe");
            assert_eq!(fs::metadata(&bin_file)?.permissions().mode() & 0o777, 0o755);
        }

        Ok(())
    }

    #[test]
    fn test_directory_entries_create_no_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let tar_path = temp_dir.path().join("dirs.tar.gz");

        let file = File::create(&tar_path)?;
        let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(gz);

        let mut dir_header = tar::Header::new_gnu();
        dir_header.set_path("go/empty/")?;
        dir_header.set_entry_type(tar::EntryType::Directory);
        dir_header.set_size(0);
        dir_header.set_mode(0o755);
        dir_header.set_cksum();
        builder.append(&dir_header, std::io::empty())?;
        builder.finish()?;
        drop(builder);

        let dest_dir = tempdir()?;
        extract(
            &tar_path,
            dest_dir.path(),
            ArchiveFormat::TarGz,
            &mut SilentReporter,
        )?;

        // Directory-only entries are skipped outright.
        assert!(!dest_dir.path().join("go/empty").exists());

        Ok(())
    }

    #[test]
    fn test_traversal_entry_rejected() -> Result<()> {
        let temp_dir = tempdir()?;
        let tar_path = temp_dir.path().join("evil.tar.gz");

        let file = File::create(&tar_path)?;
        let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(gz);

        let mut header = tar::Header::new_gnu();
        // Write the traversal path straight into the GNU name field; the
        // tar crate's `set_path` rejects `..`, which would prevent us from
        // building the malicious fixture this test requires.
        let evil_path = b"go/../../evil.txt";
        header.as_gnu_mut().unwrap().name[..evil_path.len()].copy_from_slice(evil_path);
        header.set_size(4);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &b"evil"[..])?;
        builder.finish()?;
        drop(builder);

        let dest_dir = tempdir()?;
        let result = extract(
            &tar_path,
            dest_dir.path(),
            ArchiveFormat::TarGz,
            &mut SilentReporter,
        );

        assert!(matches!(result, Err(GoverError::Extract(_))));
        assert!(!temp_dir.path().join("evil.txt").exists());

        Ok(())
    }

    #[test]
    fn test_validate_entry_path() {
        assert!(validate_entry_path(Path::new("go/bin/go")).is_ok());
        assert!(validate_entry_path(Path::new("../etc/passwd")).is_err());
        assert!(validate_entry_path(Path::new("/etc/passwd")).is_err());
    }
}
